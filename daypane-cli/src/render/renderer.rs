use super::{
    candles::{self, Cell},
    dial,
    theme::{ChartColors, OneDark, hex_color},
    week_strip,
};
use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use daypane_core::{
    ChartState, DayBox, PriceBar,
    clock::ClockFace,
    timeline::{DAY_NAMES, Marker, TimelineFrame},
};
use once_cell::sync::Lazy;
use regex::Regex;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

const CHART_WIDTH: usize = 78;
const CHART_HEIGHT: usize = 12;
const DAY_WIDTH: usize = 12;

static TAGS: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?m)(^|\s)([$#][A-Za-z0-9_][\w-]*)").ok());

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
    pub chart_title: String,
    pub symbol: String,
    pub timezone: Tz,
    pub note_placeholder: String,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// `Nasdaq-100 (^NDX): Thursday, 16 Oct 2025 PDT`
    pub fn day_header(&self, date: NaiveDate) -> String {
        let day = date.format(&self.opts.date_format);
        let zone = zone_abbreviation(&self.opts.timezone, date);
        format!("{}: {day} {zone}", self.opts.chart_title)
    }

    pub fn print_day_boxes(&self, boxes: &[DayBox]) {
        for (i, day) in boxes.iter().enumerate() {
            if self.opts.short_mode {
                self.print_day_line(day);
                continue;
            }
            self.print_day_box(day);
            if i + 1 < boxes.len() {
                println!();
            }
        }
    }

    fn print_day_line(&self, day: &DayBox) {
        let mut date = day.date.format(&self.opts.date_format).to_string();
        let mut status = match &day.chart {
            ChartState::Ready(bars) => summary(bars),
            ChartState::Failed(_) => "no chart".to_string(),
        };
        let mut note = day.text.lines().next().unwrap_or_default().to_string();
        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            status = status.with(Color::Blue).to_string();
            note = note.with(Color::Yellow).to_string();
        }
        println!("{date} {status} {note}");
    }

    pub fn print_day_box(&self, day: &DayBox) {
        self.print_md(&format!("## {}", self.day_header(day.date)));

        if day.text.trim().is_empty() {
            let placeholder = &self.opts.note_placeholder;
            if self.opts.use_color {
                self.print_md(&format!("*{placeholder}*"));
            } else {
                println!("{placeholder}");
            }
        } else {
            self.print_md(&highlight_tags(day.text.trim_end()));
        }
        println!();

        match &day.chart {
            ChartState::Ready(bars) => self.print_chart(bars),
            ChartState::Failed(message) => self.print_chart_error(message),
        }
        self.print_md("---");
    }

    pub fn print_chart(&self, bars: &[PriceBar]) {
        let Some(grid) = candles::layout(bars, CHART_WIDTH, CHART_HEIGHT) else {
            self.print_info("No bars stored for this day.");
            return;
        };

        let last = grid.rows.len().saturating_sub(1);
        for (r, row) in grid.rows.iter().enumerate() {
            let line: String = row.iter().map(|cell| self.paint_cell(*cell)).collect();
            let label = match r {
                0 => format!(" {:.2}", grid.high),
                _ if r == last => format!(" {:.2}", grid.low),
                _ => String::new(),
            };
            println!("{line}{}", self.paint(&label, ChartColors::TEXT));
        }

        let from = self.clock_time(grid.first_time);
        let to = self.clock_time(grid.last_time);
        let columns = grid.rows.first().map(Vec::len).unwrap_or_default();
        let gap = columns.saturating_sub(from.len() + to.len()).max(1);
        let axis = format!("{from}{}{to}", " ".repeat(gap));
        println!("{}", self.paint(&axis, ChartColors::GRID));
        println!("{}", summary(bars));
    }

    pub fn print_chart_error(&self, message: &str) {
        let line = format!("{} Chart Error: {message}", self.opts.symbol);
        if self.opts.use_color {
            println!("{}", line.with(ChartColors::DOWN));
        } else {
            println!("{line}");
        }
    }

    pub fn print_clock(&self, face: &ClockFace) {
        let accent = face
            .phase
            .and_then(|p| hex_color(face.theme.dosha_color(p.dosha)))
            .unwrap_or(OneDark::FG);

        for line in dial::draw(&face.hands) {
            println!("{}", self.paint(&line, accent));
        }
        println!();
        println!(
            "{} {}",
            self.paint(face.weekday_name(), OneDark::YELLOW),
            self.paint(&face.date_label, OneDark::BLUE)
        );
        println!("{}", face.time_label);
        if let Some(phase) = face.phase {
            println!("{}", self.paint(phase.name, accent));
            println!("{}", phase.description);
        }
        let backdrop = hex_color(face.backdrop.color()).unwrap_or(OneDark::BG);
        println!(
            "{}",
            self.paint(&format!("{:?} theme, {:?} backdrop", face.theme, face.backdrop), backdrop)
        );
    }

    pub fn print_timeline(&self, frame: &TimelineFrame, markers: &[Marker]) {
        let lines = week_strip::strip_lines(frame.position, markers, DAY_WIDTH);
        let colors = [OneDark::YELLOW, OneDark::RED, OneDark::COMMENT];
        for (line, color) in lines.iter().zip(colors) {
            println!("{}", self.paint(line, color));
        }

        let today = DAY_NAMES[frame.weekday.num_days_from_sunday() as usize];
        println!("{today}, {:.1}% of the week", frame.position);
        for marker in markers {
            let label = format!("{} {}", week_strip::MARKER, marker.label);
            println!("{} {}", self.paint(&label, OneDark::RED), marker.date);
        }
    }

    fn paint_cell(&self, cell: Cell) -> String {
        let (glyph, up) = match cell {
            Cell::Empty => return " ".to_string(),
            Cell::Wick { up } => ('│', up),
            Cell::Body { up } => ('┃', up),
        };
        let color = if up { ChartColors::UP } else { ChartColors::DOWN };
        self.paint(&glyph.to_string(), color)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.opts.use_color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn clock_time(&self, epoch: i64) -> String {
        DateTime::from_timestamp(epoch, 0)
            .map(|t| t.with_timezone(&self.opts.timezone).format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Abbreviation of the zone in force at noon of `date`, e.g. `PDT`.
fn zone_abbreviation(tz: &Tz, date: NaiveDate) -> String {
    date.and_hms_opt(12, 0, 0)
        .and_then(|noon| tz.from_local_datetime(&noon).earliest())
        .map(|t| t.format("%Z").to_string())
        .unwrap_or_default()
}

fn summary(bars: &[PriceBar]) -> String {
    match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => {
            let change = last.close - first.open;
            let pct = if first.open > 0.0 { change / first.open * 100.0 } else { 0.0 };
            format!("{} bars, close {:.2} ({change:+.2}, {pct:+.2}%)", bars.len(), last.close)
        }
        _ => "0 bars".to_string(),
    }
}

/// Wraps `$TICKER` and `#tag` words in inline code so the skin highlights them.
fn highlight_tags(note: &str) -> String {
    match TAGS.as_ref() {
        Some(re) => re.replace_all(note, "$1`$2`").to_string(),
        None => note.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Renderer {
        Renderer::new(RenderOptions {
            date_format: "%A, %d %b %Y".to_string(),
            use_color: false,
            short_mode: false,
            chart_title: "Nasdaq-100 (^NDX)".to_string(),
            symbol: "^NDX".to_string(),
            timezone: chrono_tz::America::Los_Angeles,
            note_placeholder: "Notes".to_string(),
        })
    }

    #[test]
    fn header_carries_the_zone_in_force() {
        let r = plain();
        let summer = NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();
        let winter = NaiveDate::from_ymd_opt(2025, 12, 16).unwrap();
        assert_eq!(r.day_header(summer), "Nasdaq-100 (^NDX): Thursday, 16 Oct 2025 PDT");
        assert_eq!(r.day_header(winter), "Nasdaq-100 (^NDX): Tuesday, 16 Dec 2025 PST");
    }

    #[test]
    fn tickers_and_tags_become_inline_code() {
        assert_eq!(
            highlight_tags("Long $NVDA into #cpi, watch $QQQ."),
            "Long `$NVDA` into `#cpi`, watch `$QQQ`."
        );
        assert_eq!(highlight_tags("no tags here"), "no tags here");
    }

    #[test]
    fn summary_reports_change() {
        let bars = [
            PriceBar { time: 1, open: 100.0, high: 101.0, low: 99.0, close: 100.5 },
            PriceBar { time: 2, open: 100.5, high: 103.0, low: 100.0, close: 102.0 },
        ];
        assert_eq!(summary(&bars), "2 bars, close 102.00 (+2.00, +2.00%)");
        assert_eq!(summary(&[]), "0 bars");
    }
}
