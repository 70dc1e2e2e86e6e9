//! The `Journal`: the entry store plus the quote source that fills its charts.
use super::journal_entry::{ChartState, DayBox};
use super::store::JournalStore;
use crate::quotes::{FetchError, QuoteSource, today_in};
use anyhow::{Result, bail};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// The central struct for journal operations.
///
/// Holds the store explicitly; every operation that changes an entry persists the whole
/// collection right away. A chart that cannot be fetched never fails the whole journal,
/// only the box it belongs to.
pub struct Journal {
    pub store: JournalStore,
    source: Box<dyn QuoteSource>,
    timezone: Tz,
}

impl Journal {
    pub fn new(store: JournalStore, source: Box<dyn QuoteSource>, timezone: Tz) -> Self {
        Self {
            store,
            source,
            timezone,
        }
    }

    /// The current journal day, in the journal's timezone.
    pub fn today(&self) -> NaiveDate {
        today_in(&self.timezone, Utc::now())
    }

    /// Produces one box per entry, newest day first.
    ///
    /// Cached bars are used as they are. Entries without bars are fetched; a successful
    /// fetch is stored and persisted before rendering, a failed one renders as an error
    /// state carrying the failure message.
    pub async fn render(&mut self) -> Vec<DayBox> {
        let dates: Vec<NaiveDate> = self.store.newest_first().iter().map(|e| e.date).collect();
        let mut boxes = Vec::with_capacity(dates.len());

        for date in dates {
            let cached = self
                .store
                .get(date)
                .filter(|e| e.has_chart())
                .map(|e| e.chart_data.clone());

            let chart = match cached {
                Some(bars) => ChartState::Ready(bars),
                None => match self.source.fetch_day(date).await {
                    Ok(bars) => {
                        self.store.set_chart_data(date, bars.clone());
                        self.persist();
                        ChartState::Ready(bars)
                    }
                    Err(error) => {
                        warn!(%date, %error, "chart fetch failed");
                        ChartState::Failed(error.to_string())
                    }
                },
            };

            let text = self
                .store
                .get(date)
                .map(|e| e.text.clone())
                .unwrap_or_default();
            boxes.push(DayBox { date, text, chart });
        }

        boxes
    }

    /// Ensures today has an entry, refreshes its chart, then renders every entry.
    ///
    /// The list is rendered whatever the refresh outcome, so today's note box is available
    /// even when the network call fails.
    pub async fn add_today(&mut self) -> Vec<DayBox> {
        let today = self.today();
        self.add_day(today).await
    }

    /// Like [`add_today`](Self::add_today) for an arbitrary day.
    pub async fn add_day(&mut self, date: NaiveDate) -> Vec<DayBox> {
        if self.store.ensure_entry(date) {
            self.persist();
        }
        if let Err(error) = self.refresh(date).await {
            warn!(%date, %error, "refresh failed");
        }
        self.render().await
    }

    /// Re-fetches the bars of `date` even when cached, storing and persisting them on success.
    ///
    /// Returns the number of bars stored. A failure leaves the cached bars untouched.
    pub async fn refresh(&mut self, date: NaiveDate) -> Result<usize, FetchError> {
        let bars = self.source.fetch_day(date).await?;
        let count = bars.len();
        if self.store.set_chart_data(date, bars) {
            self.persist();
        }
        Ok(count)
    }

    /// Commits a finished note edit for `date` and persists it.
    ///
    /// Creates the entry when it does not exist yet.
    pub fn commit_note(&mut self, date: NaiveDate, text: &str) -> Result<()> {
        self.store.ensure_entry(date);
        if !self.store.set_text(date, text) {
            bail!("no journal entry for {date}");
        }
        self.store.save()
    }

    /// Saves the store; a failed save is logged, the in-memory state stays authoritative.
    fn persist(&self) {
        if let Err(error) = self.store.save() {
            warn!(path = %self.store.path().display(), error = format!("{error:#}"), "could not save journal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::PriceBar;
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tempfile::tempdir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bar(time: i64, close: f64) -> PriceBar {
        PriceBar {
            time,
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
        }
    }

    /// Serves fixed bars, except for the listed holidays which have no timestamps.
    struct FakeSource {
        bars: Vec<PriceBar>,
        holidays: Vec<NaiveDate>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl QuoteSource for FakeSource {
        async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<PriceBar>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.holidays.contains(&date) {
                return Err(FetchError::EmptyTimestamps {
                    symbol: "^NDX".into(),
                    date: date.to_string(),
                });
            }
            Ok(self.bars.clone())
        }
    }

    /// A source whose network is always down.
    struct OfflineSource;

    #[async_trait]
    impl QuoteSource for OfflineSource {
        async fn fetch_day(&self, _date: NaiveDate) -> Result<Vec<PriceBar>, FetchError> {
            Err(FetchError::Status {
                status: 503,
                via_relay: true,
            })
        }
    }

    fn mk_journal(
        holidays: Vec<NaiveDate>,
    ) -> (Journal, Arc<AtomicUsize>, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let store = JournalStore::load(tmp.path().join("nasdaqJournal.json"));
        let calls = Arc::new(AtomicUsize::new(0));
        let source = FakeSource {
            bars: vec![bar(1_760_621_400, 24_910.0), bar(1_760_621_700, 24_925.0)],
            holidays,
            calls: calls.clone(),
        };
        let journal = Journal::new(store, Box::new(source), chrono_tz::America::Los_Angeles);
        (journal, calls, tmp)
    }

    #[tokio::test]
    async fn render_fetches_uncached_entries_and_persists_them() {
        let (mut j, calls, _tmp) = mk_journal(vec![]);
        j.store.ensure_entry(d(2025, 10, 16));

        let boxes = j.render().await;
        assert_eq!(boxes.len(), 1);
        assert!(matches!(&boxes[0].chart, ChartState::Ready(bars) if bars.len() == 2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let reloaded = JournalStore::load(j.store.path());
        assert!(reloaded.get(d(2025, 10, 16)).unwrap().has_chart());
    }

    #[tokio::test]
    async fn render_uses_cache_without_fetching() {
        let (mut j, calls, _tmp) = mk_journal(vec![]);
        let day = d(2025, 10, 16);
        j.store.ensure_entry(day);
        j.store.set_chart_data(day, vec![bar(100, 1.0)]);

        let boxes = j.render().await;
        assert_eq!(boxes[0].chart, ChartState::Ready(vec![bar(100, 1.0)]));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn holiday_renders_error_state_and_others_still_render() {
        let holiday = d(2025, 12, 25);
        let (mut j, _calls, _tmp) = mk_journal(vec![holiday]);
        j.store.ensure_entry(d(2025, 12, 24));
        j.store.ensure_entry(holiday);
        j.store.ensure_entry(d(2025, 12, 26));

        let boxes = j.render().await;
        let dates: Vec<NaiveDate> = boxes.iter().map(|b| b.date).collect();
        assert_eq!(dates, vec![d(2025, 12, 26), holiday, d(2025, 12, 24)]);

        match &boxes[1].chart {
            ChartState::Failed(message) => assert!(message.contains("2025-12-25")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(matches!(boxes[0].chart, ChartState::Ready(_)));
        assert!(matches!(boxes[2].chart, ChartState::Ready(_)));
        assert!(!j.store.get(holiday).unwrap().has_chart());
    }

    #[tokio::test]
    async fn repeated_add_today_keeps_one_entry_per_day() {
        let (mut j, calls, _tmp) = mk_journal(vec![]);
        j.add_today().await;
        j.add_today().await;
        let boxes = j.add_today().await;

        assert_eq!(j.store.entries().len(), 1);
        assert_eq!(boxes.len(), 1);
        // every add refreshes even though the bars are cached
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn add_today_offline_still_renders_note_box() {
        let tmp = tempdir().unwrap();
        let store = JournalStore::load(tmp.path().join("nasdaqJournal.json"));
        let mut j = Journal::new(store, Box::new(OfflineSource), chrono_tz::America::Los_Angeles);

        let boxes = j.add_today().await;
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].date, j.today());
        match &boxes[0].chart {
            ChartState::Failed(message) => assert_eq!(message, "HTTP 503 via relay"),
            other => panic!("expected failure, got {other:?}"),
        }
        // the empty entry was persisted
        let reloaded = JournalStore::load(j.store.path());
        assert!(reloaded.get(j.today()).is_some());
    }

    #[tokio::test]
    async fn add_today_on_a_corrupt_store_keeps_the_old_history() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nasdaqJournal.json");
        let mut blob = String::from("[");
        for day in 1..=30 {
            blob.push_str(&format!(r#"{{"date":"2025-09-{day:02}","text":"note {day}"}},"#));
        }
        blob.push_str(r#"{"date":"2025-9-31","text":"bad"}]"#);
        std::fs::write(&path, &blob).unwrap();

        let store = JournalStore::load(&path);
        let mut j = Journal::new(store, Box::new(OfflineSource), chrono_tz::America::Los_Angeles);
        let boxes = j.add_today().await;
        assert_eq!(boxes.len(), 1);

        let backup = JournalStore::backup_path(&path);
        assert_eq!(std::fs::read_to_string(backup).unwrap(), blob);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_cached_bars() {
        let tmp = tempdir().unwrap();
        let mut store = JournalStore::load(tmp.path().join("nasdaqJournal.json"));
        let day = d(2025, 10, 16);
        store.ensure_entry(day);
        store.set_chart_data(day, vec![bar(100, 1.0)]);
        let mut j = Journal::new(store, Box::new(OfflineSource), chrono_tz::America::Los_Angeles);

        assert!(j.refresh(day).await.is_err());
        assert_eq!(j.store.get(day).unwrap().chart_data, vec![bar(100, 1.0)]);
    }

    #[test]
    fn commit_note_persists_text() {
        let (mut j, _calls, _tmp) = mk_journal(vec![]);
        let day = d(2025, 10, 16);
        j.commit_note(day, "Waited for the 6:30 open.").unwrap();
        j.commit_note(day, "Waited for the 6:30 open. Took the ORB long.")
            .unwrap();

        let reloaded = JournalStore::load(j.store.path());
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(
            reloaded.get(day).unwrap().text,
            "Waited for the 6:30 open. Took the ORB long."
        );
    }
}
