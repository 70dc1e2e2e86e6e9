//! Analog clock face state.
//!
//! Everything here is a pure function of the wall-clock time; the caller re-evaluates it
//! on every tick.
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Hand rotations in degrees, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    /// The hour hand moves half a degree per minute, the minute hand a tenth per second.
    pub fn at(hour: u32, minute: u32, second: u32) -> Self {
        let (h, m, s) = ((hour % 12) as f64, minute as f64, second as f64);
        Self {
            hour: h * 30.0 + m * 0.5,
            minute: m * 6.0 + s * 0.1,
            second: s * 6.0,
        }
    }
}

/// Rotation of each of the 60 dial lines.
pub fn dial_line_angles() -> impl Iterator<Item = f64> {
    (0..60).map(|i| i as f64 * 6.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dosha {
    Kapha,
    Pitta,
    Vata,
}

/// A named time-of-day bucket, `[start, end)` in hours. `start > end` wraps past midnight.
#[derive(Debug, PartialEq, Eq)]
pub struct DoshaPhase {
    pub name: &'static str,
    pub dosha: Dosha,
    pub start: u32,
    pub end: u32,
    pub description: &'static str,
}

impl DoshaPhase {
    pub fn contains(&self, hour: u32) -> bool {
        if self.start < self.end {
            hour >= self.start && hour < self.end
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

pub const DOSHA_PHASES: [DoshaPhase; 6] = [
    DoshaPhase {
        name: "Morning Kapha",
        dosha: Dosha::Kapha,
        start: 6,
        end: 10,
        description: "Steady and grounded. Study fundamentals and build strong roots.",
    },
    DoshaPhase {
        name: "Midday Pitta",
        dosha: Dosha::Pitta,
        start: 10,
        end: 14,
        description: "Driven and productive. Ship project work and act on signals.",
    },
    DoshaPhase {
        name: "Afternoon Vata",
        dosha: Dosha::Vata,
        start: 14,
        end: 18,
        description: "Creative and mobile. Explore ideas and tools, then get moving.",
    },
    DoshaPhase {
        name: "Evening Kapha",
        dosha: Dosha::Kapha,
        start: 18,
        end: 22,
        description: "Slow and heavy. Review at a normal pace and prepare for tomorrow.",
    },
    DoshaPhase {
        name: "Night Pitta",
        dosha: Dosha::Pitta,
        start: 22,
        end: 2,
        description: "Transformative and metabolic. The body restores and digests during sleep.",
    },
    DoshaPhase {
        name: "Early Morning Vata",
        dosha: Dosha::Vata,
        start: 2,
        end: 6,
        description: "Light and subtle. Good for meditation, writing or quiet practice.",
    },
];

/// Finds the phase containing `hour` by scanning the table in order.
///
/// The table covers every hour of the day, so this only returns `None` for hours past 23.
pub fn phase_for_hour(hour: u32) -> Option<&'static DoshaPhase> {
    if hour > 23 {
        return None;
    }
    DOSHA_PHASES.iter().find(|phase| phase.contains(hour))
}

/// Colour scheme of the dial: day from 06:00 to 17:59, night otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialTheme {
    Day,
    Night,
}

impl DialTheme {
    pub fn for_hour(hour: u32) -> Self {
        if (6..18).contains(&hour) {
            DialTheme::Day
        } else {
            DialTheme::Night
        }
    }

    /// Hex colour of a dosha's dial segment under this theme.
    pub fn dosha_color(self, dosha: Dosha) -> &'static str {
        match (self, dosha) {
            (DialTheme::Day, Dosha::Kapha) => "#6fcf97",
            (DialTheme::Day, Dosha::Pitta) => "#f2994a",
            (DialTheme::Day, Dosha::Vata) => "#56ccf2",
            (DialTheme::Night, Dosha::Kapha) => "#13246e",
            (DialTheme::Night, Dosha::Pitta) => "#330e55",
            (DialTheme::Night, Dosha::Vata) => "#1f3752",
        }
    }
}

/// Page background tint behind the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Backdrop {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            6..=9 => Backdrop::Morning,
            10..=17 => Backdrop::Afternoon,
            18..=20 => Backdrop::Evening,
            _ => Backdrop::Night,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Backdrop::Morning => "#2d6277",
            Backdrop::Afternoon => "#2a6e63",
            Backdrop::Evening => "#154c6b",
            Backdrop::Night => "#1a2141",
        }
    }
}

/// Everything the clock widget shows at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    pub hands: HandAngles,
    pub weekday: Weekday,
    /// `d/MM/yyyy`
    pub date_label: String,
    pub time_label: String,
    pub theme: DialTheme,
    pub backdrop: Backdrop,
    pub phase: Option<&'static DoshaPhase>,
}

impl ClockFace {
    pub fn at(now: NaiveDateTime) -> Self {
        let hour = now.hour();
        Self {
            hands: HandAngles::at(hour, now.minute(), now.second()),
            weekday: now.weekday(),
            date_label: now.format("%-d/%m/%Y").to_string(),
            time_label: now.format("%H:%M:%S").to_string(),
            theme: DialTheme::for_hour(hour),
            backdrop: Backdrop::for_hour(hour),
            phase: phase_for_hour(hour),
        }
    }

    /// Full weekday name, e.g. `Sunday`.
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}
