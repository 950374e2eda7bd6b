use std::sync::OnceLock;

use scraper::Selector;

/// A css selector that is parsed the first time it is used.
#[derive(Debug)]
pub(super) struct StaticSelector {
    cell: OnceLock<Selector>,
    selector: &'static str,
}

impl StaticSelector {
    pub(super) const fn new(selector: &'static str) -> Self {
        Self {
            cell: OnceLock::new(),
            selector,
        }
    }
}

impl core::ops::Deref for StaticSelector {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        // selectors are literals, a bad one is a programming error
        self.cell
            .get_or_init(|| match Selector::parse(self.selector) {
                Ok(sel) => sel,
                Err(e) => panic!("invalid static selector {}: {:?}", self.selector, e),
            })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    #[test]
    fn test_selector_is_reused() {
        static_selector!(LABEL <- "div.datelabel");
        let doc = Html::parse_fragment(r#"<div class="datelabel">x</div><div>y</div>"#);
        assert_eq!(doc.select(&LABEL).count(), 1);
        // second deref hits the cached selector
        assert!(std::ptr::eq(&*LABEL, &*LABEL));
    }
}
