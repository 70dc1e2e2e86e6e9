use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::form_urlencoded::byte_serialize;

use super::{FetchError, QuoteSource, parse_chart, window::day_window};
use crate::{config::Config, journal::PriceBar};

/// Intraday bars from the v8 chart endpoint, optionally routed through a relay.
pub struct YahooChartSource {
    client: Client,
    base_url: String,
    relay: Option<String>,
    symbol: String,
    interval: String,
    timezone: Tz,
}

/// Upper bound for one chart request, relay included. Days are fetched one after the
/// other, so a stalled relay must not hold up the remaining boxes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

impl YahooChartSource {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    /// Like [`new`](Self::new) with a custom request timeout. A request running past it
    /// fails with [`FetchError::Request`].
    pub fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("daypane/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.quote_base_url.trim_end_matches('/').to_string(),
            relay: config.relay.clone(),
            symbol: config.symbol.clone(),
            interval: config.interval.clone(),
            timezone: config.timezone,
        })
    }

    /// The upstream chart URL for `date` as seen at `now`.
    pub fn chart_url(&self, date: NaiveDate, now: DateTime<Utc>) -> String {
        let window = day_window(date, &self.timezone, now);
        let symbol: String = byte_serialize(self.symbol.as_bytes()).collect();
        let interval: String = byte_serialize(self.interval.as_bytes()).collect();
        format!(
            "{}/{}?interval={}&period1={}&period2={}",
            self.base_url, symbol, interval, window.start, window.end
        )
    }

    /// The URL actually requested: the chart URL, percent-encoded behind the relay if any.
    pub fn request_url(&self, date: NaiveDate, now: DateTime<Utc>) -> String {
        let upstream = self.chart_url(date, now);
        match &self.relay {
            Some(relay) => {
                let encoded: String = byte_serialize(upstream.as_bytes()).collect();
                format!("{relay}{encoded}")
            }
            None => upstream,
        }
    }
}

#[async_trait]
impl QuoteSource for YahooChartSource {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<PriceBar>, FetchError> {
        let url = self.request_url(date, Utc::now());
        debug!(%date, %url, "fetching {}", self.symbol);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%date, status = status.as_u16(), "chart request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                via_relay: self.relay.is_some(),
            });
        }

        let body = response.text().await?;
        let bars = parse_chart(&body, &self.symbol, date)?;
        debug!(%date, count = bars.len(), "parsed {} bars", self.symbol);
        Ok(bars)
    }
}
