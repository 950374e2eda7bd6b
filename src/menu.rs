use tracing::{instrument, Level};

use crate::{config::Config, fetch::MenuSource, parse::DailyMenu};

/// Fetches and parses the configured page.
///
/// Network errors, bad status codes and pages without a readable date all
/// end up as `None`, after being logged.
#[instrument(skip_all, fields(url = %config.url), level = Level::DEBUG)]
pub async fn get_menu(source: &impl MenuSource, config: &Config) -> Option<DailyMenu> {
    let page = match source.menu_page(&config.url).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("Could not fetch menu from {}: {e}", config.url);
            return None;
        }
    };
    match DailyMenu::from_html(&page) {
        Ok(menu) => {
            log::debug!(
                "Found {} dishes for {}",
                menu.dishes().len(),
                menu.display_date()
            );
            Some(menu)
        }
        Err(e) => {
            log::warn!("No menu on {}: {e}", config.url);
            None
        }
    }
}
