use super::{remove_excess_whitespace, Error};
use scraper::{ElementRef, Selector};

/// Text of the first element matching `selector`, errors if nothing matches.
pub fn text_from_selection(
    selector: &Selector,
    element: ElementRef<'_>,
    label: &str,
) -> Result<String, Error> {
    let found = element
        .select(selector)
        .next() // first match
        .ok_or_else(|| Error::html_parse_error(&format!("The page should have a {label}.")))?;
    Ok(get_inner_text(found))
}

/// All text nodes below `element`, joined and with whitespace collapsed and trimmed.
pub fn get_inner_text(element: ElementRef<'_>) -> String {
    let joined = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    remove_excess_whitespace(&joined).trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_selector;
    use scraper::Html;

    #[test]
    fn test_joins_nested_text() {
        static_selector!(DISH <- "div#maindish");
        let doc = Html::parse_fragment(
            "<div id=\"maindish\">\n  <b>Spaghetti</b>\n  <span>Bolognese</span>  </div>",
        );
        let text = text_from_selection(&DISH, doc.root_element(), "dish").unwrap();
        assert_eq!(text, "Spaghetti Bolognese");
    }

    #[test]
    fn test_missing_element() {
        static_selector!(LABEL <- "div.datelabel");
        let doc = Html::parse_fragment("<div>nothing here</div>");
        let err = text_from_selection(&LABEL, doc.root_element(), "date label").unwrap_err();
        assert!(matches!(err, Error::HtmlParse(_)));
    }
}
