use thiserror::Error;

/// Why a day's bars could not be produced. The `Display` text is what a failed chart box shows.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: DNS, connect, TLS, timeout, truncated body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The relay or the upstream answered with a non-success status.
    #[error("HTTP {status}{}", relay_suffix(.via_relay))]
    Status { status: u16, via_relay: bool },

    /// The body was not the expected JSON document.
    #[error("unreadable chart response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The document carried no chart result, optionally with the upstream's own reason.
    #[error("no chart data for {symbol} on {date}{}", reason_suffix(.reason))]
    MissingResult {
        symbol: String,
        date: String,
        reason: Option<String>,
    },

    /// A result was present but had no timestamps, e.g. a market holiday.
    #[error("no timestamps for {symbol} on {date}, market closed?")]
    EmptyTimestamps { symbol: String, date: String },
}

fn relay_suffix(via_relay: &bool) -> &'static str {
    if *via_relay { " via relay" } else { "" }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default()
}
