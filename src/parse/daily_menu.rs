use chrono::NaiveDate;

use super::text_from_selection::{get_inner_text, text_from_selection};
use crate::parse::Error;
use crate::static_selector;
use crate::weekday::german_weekday;

/// At most this many dishes are kept per day.
pub const MAX_DISHES: usize = 3;
/// The site fills empty dish slots with "Tagesgericht 1: -" and the like.
pub const PLACEHOLDER_PREFIX: &str = "Tagesgericht";

const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMenu {
    date: NaiveDate,
    dishes: Vec<String>,
}

impl DailyMenu {
    pub fn dishes(&self) -> &[String] {
        &self.dishes
    }

    /// Weekday and date as shown in the notification, e.g. `Montag 02.06.2025`.
    pub fn display_date(&self) -> String {
        format!(
            "{} {}",
            german_weekday(&self.date),
            self.date.format(DATE_FORMAT)
        )
    }

    pub fn from_html_element(element: scraper::ElementRef<'_>) -> Result<Self, Error> {
        static_selector!(DATE_SELECTOR <- "div.datelabel");
        static_selector!(DISH_SELECTOR <- "div#maindish");

        let label = text_from_selection(&DATE_SELECTOR, element, "date label")?;
        let date = parse_date_label(&label)?;

        let dishes = element
            .select(&DISH_SELECTOR)
            .map(get_inner_text)
            .filter(|dish| !dish.is_empty() && !dish.starts_with(PLACEHOLDER_PREFIX))
            .take(MAX_DISHES)
            .collect();

        Ok(Self { date, dishes })
    }

    pub fn from_html(html: &str) -> Result<Self, Error> {
        let document = scraper::Html::parse_document(html);
        Self::from_html_element(document.root_element())
    }
}

/// Picks the first whitespace separated token containing a `.` and reads it as `dd.mm.yyyy`.
fn parse_date_label(label: &str) -> Result<NaiveDate, Error> {
    let token = label
        .split_whitespace()
        .find(|part| part.contains('.'))
        .ok_or_else(|| Error::date_parse_error(&format!("No date in label {label:?}")))?;
    Ok(NaiveDate::parse_from_str(token, DATE_FORMAT)?)
}
