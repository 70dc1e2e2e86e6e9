mod journal;
mod journal_entry;
mod price_bar;
mod store;

pub use journal::Journal;
pub use journal_entry::{ChartState, DayBox, JournalEntry};
pub use price_bar::PriceBar;
pub use store::JournalStore;
