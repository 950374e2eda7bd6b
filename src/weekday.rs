use chrono::Datelike;

/// German weekday names, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

#[must_use]
pub fn german_weekday(date: &impl Datelike) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

#[inline]
#[must_use]
pub fn is_weekday_name(name: &str) -> bool {
    WEEKDAYS.contains(&name)
}
