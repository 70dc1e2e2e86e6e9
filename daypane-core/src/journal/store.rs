//! The persisted entry collection.
//!
//! The whole collection lives in one JSON blob on disk and is rewritten on every save.
//! Concurrent writers are not coordinated: the last save wins.
use super::journal_entry::JournalEntry;
use super::price_bar::PriceBar;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct JournalStore {
    path: PathBuf,
    entries: Vec<JournalEntry>,
    /// Set when the blob on disk could not be read and could not be backed up either;
    /// saving would destroy it, so `save` refuses.
    read_only: bool,
}

impl JournalStore {
    /// Creates an empty store that will save to `path`. Nothing is read or written.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
            read_only: false,
        }
    }

    /// Loads the collection stored at `path`.
    ///
    /// A missing file is an empty journal. A malformed blob is copied next to the store
    /// (see [`backup_path`](Self::backup_path)) and the journal starts empty, so a corrupt
    /// store never blocks rendering and is never lost to the next save. When the blob
    /// cannot be read or backed up the store is read-only.
    /// Duplicate days in the blob keep their first occurrence.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut read_only = false;
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => match serde_json::from_str::<Vec<JournalEntry>>(&raw) {
                Ok(entries) => dedup_by_date(entries),
                Err(error) => {
                    let backup = Self::backup_path(&path);
                    match fs::copy(&path, &backup) {
                        Ok(_) => warn!(
                            path = %path.display(),
                            backup = %backup.display(),
                            %error,
                            "journal store is malformed, backed it up and starting empty"
                        ),
                        Err(copy_error) => {
                            warn!(
                                path = %path.display(),
                                %error,
                                %copy_error,
                                "journal store is malformed and could not be backed up, not saving"
                            );
                            read_only = true;
                        }
                    }
                    Vec::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                warn!(path = %path.display(), %error, "journal store is unreadable, not saving");
                read_only = true;
                Vec::new()
            }
        };
        debug!(path = %path.display(), count = entries.len(), "loaded journal store");
        Self {
            path,
            entries,
            read_only,
        }
    }

    /// `nasdaqJournal.json` is backed up to `nasdaqJournal.json.bak`.
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Writes the whole collection, replacing the previous blob atomically.
    pub fn save(&self) -> Result<()> {
        if self.read_only {
            bail!(
                "refusing to overwrite {}: it could not be read or backed up",
                self.path.display()
            );
        }
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)
            .with_context(|| format!("creating store directory {}", parent.display()))?;

        let json = serde_json::to_string(&self.entries).context("serializing journal entries")?;
        let mut file = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("creating temporary file in {}", parent.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("writing {}", file.path().display()))?;
        file.persist(&self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;

        info!(path = %self.path.display(), count = self.entries.len(), "saved journal store");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in storage order (the order they were created).
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    fn get_mut(&mut self, date: NaiveDate) -> Option<&mut JournalEntry> {
        self.entries.iter_mut().find(|e| e.date == date)
    }

    /// Makes sure an entry exists for `date`. Returns `true` when one was created.
    pub fn ensure_entry(&mut self, date: NaiveDate) -> bool {
        if self.get(date).is_some() {
            return false;
        }
        self.entries.push(JournalEntry::new(date));
        true
    }

    /// Replaces the note of `date`. Returns `false` when there's no such entry.
    pub fn set_text(&mut self, date: NaiveDate, text: &str) -> bool {
        match self.get_mut(date) {
            Some(entry) => {
                entry.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Replaces the cached bars of `date`. Returns `false` when there's no such entry.
    pub fn set_chart_data(&mut self, date: NaiveDate, bars: Vec<PriceBar>) -> bool {
        match self.get_mut(date) {
            Some(entry) => {
                entry.chart_data = bars;
                true
            }
            None => false,
        }
    }

    /// Entries ordered for display: newest day first.
    pub fn newest_first(&self) -> Vec<&JournalEntry> {
        let mut sorted: Vec<&JournalEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}

fn dedup_by_date(entries: Vec<JournalEntry>) -> Vec<JournalEntry> {
    let mut kept: Vec<JournalEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if kept.iter().any(|e| e.date == entry.date) {
            warn!(date = %entry.date, "dropping duplicate journal entry");
            continue;
        }
        kept.push(entry);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bar(time: i64) -> PriceBar {
        PriceBar {
            time,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = tempdir().unwrap();
        let store = JournalStore::load(tmp.path().join("nasdaqJournal.json"));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nasdaqJournal.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JournalStore::load(&path);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn one_bad_entry_is_backed_up_before_the_next_save() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nasdaqJournal.json");
        let blob = r#"[{"date":"2025-09-30","text":"kept"},{"date":"2025-9-31","text":"bad day"}]"#;
        fs::write(&path, blob).unwrap();

        let mut store = JournalStore::load(&path);
        assert!(store.entries().is_empty());
        let backup = JournalStore::backup_path(&path);
        assert_eq!(backup, tmp.path().join("nasdaqJournal.json.bak"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), blob);

        store.ensure_entry(d(2025, 10, 17));
        store.save().unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), blob);
        assert_eq!(JournalStore::load(&path).entries().len(), 1);
    }

    #[test]
    fn malformed_file_without_backup_is_never_overwritten() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nasdaqJournal.json");
        fs::write(&path, "{ not json").unwrap();
        // a directory in the way makes the backup copy fail
        fs::create_dir(JournalStore::backup_path(&path)).unwrap();

        let mut store = JournalStore::load(&path);
        store.ensure_entry(d(2025, 10, 17));
        assert!(store.save().is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn saved_note_survives_reload() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("nasdaqJournal.json");
        let day = d(2025, 10, 16);

        let mut store = JournalStore::load(&path);
        store.ensure_entry(day);
        assert!(store.set_text(day, "Faded the open.\nSecond line."));
        store.set_chart_data(day, vec![bar(1_760_600_000)]);
        store.save().unwrap();

        let reloaded = JournalStore::load(&path);
        let entry = reloaded.get(day).expect("entry reloaded");
        assert_eq!(entry.text, "Faded the open.\nSecond line.");
        assert_eq!(entry.chart_data, vec![bar(1_760_600_000)]);
    }

    #[test]
    fn ensure_entry_is_idempotent() {
        let tmp = tempdir().unwrap();
        let mut store = JournalStore::empty(tmp.path().join("j.json"));
        let day = d(2025, 10, 17);
        assert!(store.ensure_entry(day));
        assert!(!store.ensure_entry(day));
        assert!(!store.ensure_entry(day));
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn setters_report_unknown_days() {
        let tmp = tempdir().unwrap();
        let mut store = JournalStore::empty(tmp.path().join("j.json"));
        assert!(!store.set_text(d(2025, 1, 1), "nothing here"));
        assert!(!store.set_chart_data(d(2025, 1, 1), vec![bar(1)]));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn newest_first_sorts_descending_without_reordering_storage() {
        let tmp = tempdir().unwrap();
        let mut store = JournalStore::empty(tmp.path().join("j.json"));
        store.ensure_entry(d(2025, 10, 15));
        store.ensure_entry(d(2025, 10, 17));
        store.ensure_entry(d(2025, 9, 30));

        let order: Vec<NaiveDate> = store.newest_first().iter().map(|e| e.date).collect();
        assert_eq!(order, vec![d(2025, 10, 17), d(2025, 10, 15), d(2025, 9, 30)]);
        assert_eq!(store.entries()[0].date, d(2025, 10, 15));
    }

    #[test]
    fn duplicate_days_in_blob_keep_the_first() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("j.json");
        fs::write(
            &path,
            r#"[{"date":"2025-10-01","text":"first"},{"date":"2025-10-01","text":"second"}]"#,
        )
        .unwrap();
        let store = JournalStore::load(&path);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.get(d(2025, 10, 1)).unwrap().text, "first");
    }
}
