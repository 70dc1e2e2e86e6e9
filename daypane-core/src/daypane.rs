use crate::{
    Config,
    journal::{Journal, JournalStore},
    parse_input::{ParseOptions, parse_day_token},
    quotes::{YahooChartSource, today_in},
};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

pub struct Daypane {
    pub config: Config,
}

impl Daypane {
    /// Creates a new `Daypane` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Loads the journal store and wires it to the configured quote endpoint.
    pub fn open_journal(&self) -> Result<Journal> {
        let store = JournalStore::load(&self.config.store_path);
        let source = YahooChartSource::new(&self.config).context("building quote client")?;
        Ok(Journal::new(store, Box::new(source), self.config.timezone))
    }

    /// The current journal day, in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        today_in(&self.config.timezone, Utc::now())
    }

    /// Resolves a day typed by the user (`today`, `friday`, `2025-10-16`...).
    pub fn parse_day(&self, token: &str) -> Option<NaiveDate> {
        let formats = self.config.input_formats();
        let opts = ParseOptions {
            reference_date: self.today(),
            formats: Some(formats.as_slice()),
        };
        parse_day_token(token, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::mk_config;
    use chrono::Duration;
    use tempfile::tempdir;

    fn mk_daypane() -> (Daypane, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().join("daypane").join("nasdaqJournal.json"));
        (Daypane::with_config(config), tmp)
    }

    #[test]
    fn parse_day_is_relative_to_journal_today() {
        let (daypane, _tmp) = mk_daypane();
        let today = daypane.today();
        assert_eq!(daypane.parse_day("today"), Some(today));
        assert_eq!(daypane.parse_day("yesterday"), Some(today - Duration::days(1)));
        assert_eq!(
            daypane.parse_day("2025-10-16"),
            NaiveDate::from_ymd_opt(2025, 10, 16)
        );
        assert_eq!(daypane.parse_day("16/10/2025"), None);
    }

    #[test]
    fn open_journal_on_fresh_store_is_empty() {
        let (daypane, _tmp) = mk_daypane();
        let journal = daypane.open_journal().unwrap();
        assert!(journal.store.entries().is_empty());
        assert_eq!(journal.store.path(), daypane.config.store_path.as_path());
    }

    #[test]
    fn notes_committed_through_one_journal_are_seen_by_the_next() {
        let (daypane, _tmp) = mk_daypane();
        let day = NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();

        let mut journal = daypane.open_journal().unwrap();
        journal.commit_note(day, "Chop all morning.").unwrap();

        let reopened = daypane.open_journal().unwrap();
        assert_eq!(reopened.store.get(day).unwrap().text, "Chop all morning.");
    }
}
