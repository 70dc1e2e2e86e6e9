use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// The `[start, end]` epoch-second range requested for one journal day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: i64,
    pub end: i64,
}

/// Computes the window covering `date` in `tz`.
///
/// Starts at local midnight. Ends at `now` when `date` is today in `tz`, otherwise at
/// 23:59:59 local time, so a day that has fully elapsed always maps to the same window.
pub fn day_window<Tz: TimeZone>(date: NaiveDate, tz: &Tz, now: DateTime<Utc>) -> FetchWindow {
    let start = resolve_local(tz, date.and_time(NaiveTime::MIN), true);
    let end = if now.with_timezone(tz).date_naive() == date {
        now.timestamp()
    } else {
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        resolve_local(tz, date.and_time(last_second), false)
    };
    FetchWindow { start, end }
}

/// Returns the journal day `now` falls on in `tz`.
pub fn today_in<Tz: TimeZone>(tz: &Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// Maps a local wall time to epoch seconds.
///
/// Ambiguous times (fall-back) pick the earliest instant for a window start and the
/// latest for a window end. Nonexistent times (spring-forward gap) shift forward a
/// minute at a time until they exist.
fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime, is_start: bool) -> i64 {
    let mut candidate = local;
    // DST gaps are at most a couple of hours
    for _ in 0..=180 {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return dt.timestamp(),
            LocalResult::Ambiguous(earliest, latest) => {
                return if is_start {
                    earliest.timestamp()
                } else {
                    latest.timestamp()
                };
            }
            LocalResult::None => candidate += chrono::Duration::minutes(1),
        }
    }
    tz.from_utc_datetime(&local).timestamp()
}
