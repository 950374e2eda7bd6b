pub const TITLE: &str = "🍴 RBZ Speiseplan";

const FOOTER: &str = "- - - - - - - - - -";

/// Renders the day's dishes as a numbered list below the date.
pub fn format_menu_message(date: &str, dishes: &[String]) -> String {
    let numbered: String = dishes
        .iter()
        .enumerate()
        .map(|(i, dish)| format!("{}. {dish}\n", i + 1))
        .collect();
    format!("📅 {date}\n\n🍽️ Heute gibt es:\n\n{numbered}\n{FOOTER}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let dishes = vec!["Spaghetti".to_owned(), "Salat".to_owned()];
        let message = format_menu_message("Montag 02.06.2025", &dishes);
        assert_eq!(
            message,
            "📅 Montag 02.06.2025\n\n🍽️ Heute gibt es:\n\n1. Spaghetti\n2. Salat\n\n- - - - - - - - - -"
        );
        assert_eq!(message, format_menu_message("Montag 02.06.2025", &dishes));
    }

    #[test]
    fn test_no_dishes() {
        let message = format_menu_message("Freitag 06.06.2025", &[]);
        assert_eq!(
            message,
            "📅 Freitag 06.06.2025\n\n🍽️ Heute gibt es:\n\n\n- - - - - - - - - -"
        );
        assert!(!message.contains("1. "));
    }
}
