use serde::{Deserialize, Serialize};

/// One OHLC price sample. `time` is epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    /// A bar with a non-positive close or timestamp is a missing sample.
    pub fn is_valid(&self) -> bool {
        self.close > 0.0 && self.time > 0
    }

    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}
