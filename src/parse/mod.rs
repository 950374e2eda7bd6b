mod daily_menu;
mod error;
mod remove_excess_whitespace;
mod static_selector;
mod text_from_selection;

pub use daily_menu::DailyMenu;
pub use error::Error;
pub use remove_excess_whitespace::remove_excess_whitespace;
