//! Shape of the v8 chart endpoint and its conversion into [`PriceBar`]s.
//!
//! ```json
//! { "chart": { "result": [ { "timestamp": [..],
//!                            "indicators": { "quote": [ { "open": [..], "high": [..],
//!                                                         "low": [..], "close": [..] } ] } } ],
//!              "error": null } }
//! ```
use chrono::NaiveDate;
use serde::Deserialize;

use super::errors::FetchError;
use crate::journal::PriceBar;

#[derive(Deserialize, Debug, Default)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub chart: Option<ChartBody>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartApiError>,
}

#[derive(Deserialize, Debug)]
pub struct ChartApiError {
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Option<Indicators>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
}

/// Column-oriented samples; `null` marks a missing value.
#[derive(Deserialize, Debug, Default)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Parses a chart response body into the valid bars of `date`, ascending by time.
///
/// Missing or `null` samples read as `0` and the resulting invalid bars are dropped.
/// Repeated timestamps keep their last sample so the output is strictly increasing.
pub fn parse_chart(body: &str, symbol: &str, date: NaiveDate) -> Result<Vec<PriceBar>, FetchError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;
    let chart = envelope.chart.unwrap_or_default();

    let Some(result) = chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(FetchError::MissingResult {
            symbol: symbol.to_string(),
            date: date.to_string(),
            reason: chart
                .error
                .and_then(|e| e.description.or(e.code)),
        });
    };

    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Err(FetchError::EmptyTimestamps {
            symbol: symbol.to_string(),
            date: date.to_string(),
        });
    }

    let quote = result
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .unwrap_or_default();
    let sample = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten().unwrap_or(0.0);

    let mut bars: Vec<PriceBar> = timestamps
        .iter()
        .enumerate()
        .map(|(i, &time)| PriceBar {
            time,
            open: sample(&quote.open, i),
            high: sample(&quote.high, i),
            low: sample(&quote.low, i),
            close: sample(&quote.close, i),
        })
        .filter(PriceBar::is_valid)
        .collect();

    bars.sort_by_key(|b| b.time);
    // keep the later sample of a repeated timestamp
    bars.reverse();
    bars.dedup_by_key(|b| b.time);
    bars.reverse();

    Ok(bars)
}
