//! Weekly schedule timeline.
//!
//! The week runs Sunday 00:00 to Saturday 24:00 and positions are percentages of it.
//! Markers are dropped once when the wall clock reaches a tracked session minute and
//! stay until the next week starts.
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Column labels, in week order.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Position of `time` on `weekday` as a percentage of the week, `0.0..100.0`.
pub fn week_position(weekday: Weekday, time: NaiveTime) -> f64 {
    let day = weekday.num_days_from_sunday() as f64;
    let hours = time.hour() as f64 + time.minute() as f64 / 60.0;
    (day + hours / 24.0) / 7.0 * 100.0
}

/// A recurring session start that earns a marker.
#[derive(Debug, PartialEq, Eq)]
pub struct Session {
    pub key: &'static str,
    pub label: &'static str,
    pub days: &'static [Weekday],
    pub hour: u32,
    pub minute: u32,
}

impl Session {
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.days.contains(&now.weekday()) && now.hour() == self.hour && now.minute() == self.minute
    }

    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

pub const SESSIONS: [Session; 3] = [
    Session {
        key: "market_open",
        label: "Market Open",
        days: &[Weekday::Sun],
        hour: 14,
        minute: 0,
    },
    Session {
        key: "friday_market_close",
        label: "Market Close",
        days: &[Weekday::Fri],
        hour: 14,
        minute: 0,
    },
    Session {
        key: "ny_session",
        label: "NY Session Open",
        days: &[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        hour: 6,
        minute: 30,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: &'static str,
    pub label: &'static str,
    pub date: NaiveDate,
    pub position: f64,
}

/// What one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFrame {
    pub weekday: Weekday,
    /// Where the "now" line sits, percent of the week.
    pub position: f64,
    /// Markers dropped by this tick.
    pub dropped: Vec<Marker>,
}

#[derive(Debug, Default)]
pub struct Timeline {
    week_start: Option<NaiveDate>,
    markers: Vec<Marker>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the "now" line and drops a marker for every session due this minute
    /// that has not been marked on this date yet.
    pub fn tick(&mut self, now: NaiveDateTime) -> TimelineFrame {
        let date = now.date();
        let week_start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
        if self.week_start != Some(week_start) {
            self.week_start = Some(week_start);
            self.markers.clear();
        }

        let mut dropped = Vec::new();
        for session in SESSIONS.iter().filter(|s| s.is_due(now)) {
            let already = self
                .markers
                .iter()
                .any(|m| m.key == session.key && m.date == date);
            if already {
                continue;
            }
            let marker = Marker {
                key: session.key,
                label: session.label,
                date,
                position: week_position(date.weekday(), session.time()),
            };
            self.markers.push(marker.clone());
            dropped.push(marker);
        }

        TimelineFrame {
            weekday: now.weekday(),
            position: week_position(now.weekday(), now.time()),
            dropped,
        }
    }

    /// Markers dropped so far this week, in drop order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}
