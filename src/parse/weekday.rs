use chrono::{Datelike, Local, Weekday};

/// Czech weekday spellings with and without diacritics.
///
/// Matching is by substring in this order; the first hit wins when a line
/// happens to contain more than one name. Substring matching also fires on
/// compound words that merely contain a day name, which is a known
/// imprecision kept for compatibility with existing pages.
pub const WEEKDAY_KEYWORDS: [(&str, Weekday); 13] = [
    ("pondeli", Weekday::Mon),
    ("pondělí", Weekday::Mon),
    ("utery", Weekday::Tue),
    ("úterý", Weekday::Tue),
    ("streda", Weekday::Wed),
    ("středa", Weekday::Wed),
    ("ctvrtek", Weekday::Thu),
    ("čtvrtek", Weekday::Thu),
    ("patek", Weekday::Fri),
    ("pátek", Weekday::Fri),
    ("sobota", Weekday::Sat),
    ("nedele", Weekday::Sun),
    ("neděle", Weekday::Sun),
];

pub fn weekday_from_line(line: &str) -> Option<Weekday> {
    let low = line.to_lowercase();
    WEEKDAY_KEYWORDS
        .iter()
        .find(|(keyword, _)| low.contains(keyword))
        .map(|(_, day)| *day)
}

/// 0 = Sunday .. 6 = Saturday, the numbering used in the snapshot.
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Today according to the local clock. Run with `TZ=Europe/Prague` when the
/// host lives elsewhere.
pub fn current_weekday() -> Weekday {
    Local::now().weekday()
}
