pub mod clock;
pub mod config;
pub mod daypane;
pub mod journal;
pub mod keywords;
pub mod parse_input;
pub mod quotes;
pub mod timeline;

pub use config::Config;
pub use daypane::Daypane;
pub use journal::{ChartState, DayBox, Journal, JournalEntry, JournalStore, PriceBar};
pub use quotes::{FetchError, QuoteSource, YahooChartSource};
