use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price_bar::PriceBar;

/// One day's journal record: the note and the cached chart bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub chart_data: Vec<PriceBar>,
}

impl JournalEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            text: String::new(),
            chart_data: Vec::new(),
        }
    }

    pub fn has_chart(&self) -> bool {
        !self.chart_data.is_empty()
    }
}

/// What a day's chart area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Ready(Vec<PriceBar>),
    /// The fetch failed; carries the message shown in place of the chart.
    Failed(String),
}

/// A rendered day: the note and the chart area, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBox {
    pub date: NaiveDate,
    pub text: String,
    pub chart: ChartState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_stored_camel_case_blob() {
        let raw = r#"{"date":"2025-10-01","text":"gap up","chartData":[{"time":1759330800,"open":1.0,"high":2.0,"low":0.5,"close":1.5}]}"#;
        let entry: JournalEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(entry.text, "gap up");
        assert_eq!(entry.chart_data.len(), 1);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let entry: JournalEntry = serde_json::from_str(r#"{"date":"2025-10-01"}"#).unwrap();
        assert!(entry.text.is_empty());
        assert!(!entry.has_chart());
    }
}
