//! Fetching a day's intraday bars.
//!
//! [`QuoteSource`] is the seam between the journal and the network: the journal only asks
//! for "the bars of this day" and caches whatever comes back. [`YahooChartSource`] is the
//! production implementation; tests plug in their own.
mod errors;
mod response;
mod window;
mod yahoo;

pub use errors::FetchError;
pub use response::parse_chart;
pub use window::{FetchWindow, day_window, today_in};
pub use yahoo::YahooChartSource;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::journal::PriceBar;

#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Returns the valid bars covering `date`, ascending by time.
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<PriceBar>, FetchError>;
}
