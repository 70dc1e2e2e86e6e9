use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::keywords::{Keyword, Keywords};

/// Default accepted input date formats (parsing only).
const DEFAULT_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Configuration options for parsing functions.
#[derive(Copy, Clone, Debug)]
pub struct ParseOptions<'a> {
    /// The date to use as "today" for relative keywords.
    pub reference_date: NaiveDate,
    /// A slice of `chrono` format strings to try for parsing dates.
    pub formats: Option<&'a [&'a str]>,
}

/// Parses a string token into a journal day.
///
/// Understood, in order:
/// 1. Relative keywords: `today`, `yesterday`, `tomorrow` and any configured synonyms.
/// 2. Weekday names, resolved to the most recent such day (today included).
/// 3. Any of the configured `formats`, `%Y-%m-%d` and `%Y%m%d` by default.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use daypane_core::parse_input::{parse_day_token, ParseOptions};
/// let opts = ParseOptions {
///     reference_date: NaiveDate::from_ymd_opt(2025, 10, 17).unwrap(),
///     formats: None,
/// };
///
/// let yesterday = parse_day_token("yesterday", opts).unwrap();
/// assert_eq!(yesterday, NaiveDate::from_ymd_opt(2025, 10, 16).unwrap());
///
/// let specific = parse_day_token("2025-01-20", opts).unwrap();
/// assert_eq!(specific, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
/// ```
pub fn parse_day_token(s: &str, options: ParseOptions) -> Option<NaiveDate> {
    let reference_date = options.reference_date;
    let formats = options.formats.unwrap_or(DEFAULT_FORMATS);
    let s = s.trim();

    if Keywords::matches(Keyword::Today, s) {
        return Some(reference_date);
    }
    if Keywords::matches(Keyword::Yesterday, s) {
        return Some(reference_date - Duration::days(1));
    }
    if Keywords::matches(Keyword::Tomorrow, s) {
        return Some(reference_date + Duration::days(1));
    }

    let day_keyword = [
        (Keyword::Monday, Weekday::Mon),
        (Keyword::Tuesday, Weekday::Tue),
        (Keyword::Wednesday, Weekday::Wed),
        (Keyword::Thursday, Weekday::Thu),
        (Keyword::Friday, Weekday::Fri),
        (Keyword::Saturday, Weekday::Sat),
        (Keyword::Sunday, Weekday::Sun),
    ]
    .iter()
    .find(|(keyword, _)| Keywords::matches(*keyword, s));

    if let Some((_, weekday)) = day_keyword {
        let today_wd = reference_date.weekday();
        let days_ago = (today_wd.num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
        return Some(reference_date - Duration::days(days_ago as i64));
    }

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
