use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::keywords::Keywords;

/// Key the journal blob is stored under; also the file stem of the default store.
pub const STORE_KEY: &str = "nasdaqJournal";

const DEFAULT_SYMBOL: &str = "^NDX";
const DEFAULT_CHART_TITLE: &str = "Nasdaq-100 (^NDX)";
const DEFAULT_INTERVAL: &str = "5m";
const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
const DEFAULT_RELAY: &str = "https://corsproxy.io/?";
const DEFAULT_QUOTE_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const DEFAULT_NOTE_PLACEHOLDER: &str =
    "Notes: Macro forces, top tech components, open trade setup...";

#[derive(Debug, Clone)]
pub struct Config {
    /// File holding the serialized journal entries.
    pub store_path: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI falls back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Quote symbol requested from the chart endpoint.
    pub symbol: String,
    /// Human readable name shown in each day's box header.
    pub chart_title: String,
    /// Intraday bar granularity (e.g. `5m`).
    pub interval: String,
    /// Timezone journal days are measured in.
    pub timezone: Tz,
    /// Prefix the upstream URL is appended to, percent-encoded. `None` requests upstream directly.
    pub relay: Option<String>,
    pub quote_base_url: String,
    /// Format used to print journal days.
    pub date_format: String,
    /// Formats accepted when a day is typed on the command line.
    pub input_date_formats: Vec<String>,
    /// Shown in place of an empty note.
    pub note_placeholder: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    store_path: Option<PathBuf>,
    editor: Option<String>,
    symbol: Option<String>,
    chart_title: Option<String>,
    interval: Option<String>,
    timezone: Option<String>,
    /// An empty string disables the relay.
    relay: Option<String>,
    quote_base_url: Option<String>,
    date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
    note_placeholder: Option<String>,
    /// Optional table:
    /// [synonyms]
    /// ytd = "yesterday"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Self::load_synonyms(&file_config.synonyms);
        Self::from_file_config(file_config)
    }

    fn from_file_config(file_config: FileConfig) -> Result<Self> {
        let timezone_name = file_config
            .timezone
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = Self::parse_timezone(&timezone_name)?;

        let relay = match file_config.relay {
            Some(r) if r.trim().is_empty() => None,
            Some(r) => Some(r),
            None => Some(DEFAULT_RELAY.to_string()),
        };

        Ok(Self {
            store_path: file_config
                .store_path
                .unwrap_or_else(Self::default_store_path),
            editor: file_config.editor,
            symbol: file_config
                .symbol
                .unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
            chart_title: file_config
                .chart_title
                .unwrap_or_else(|| DEFAULT_CHART_TITLE.to_string()),
            interval: file_config
                .interval
                .unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
            timezone,
            relay,
            quote_base_url: file_config
                .quote_base_url
                .unwrap_or_else(|| DEFAULT_QUOTE_BASE_URL.to_string()),
            date_format: file_config
                .date_format
                .unwrap_or_else(|| "%A, %d %b %Y".to_string()),
            input_date_formats: file_config
                .input_date_formats
                .unwrap_or_else(|| vec!["%Y-%m-%d".to_string(), "%d/%m/%Y".to_string()]),
            note_placeholder: file_config
                .note_placeholder
                .unwrap_or_else(|| DEFAULT_NOTE_PLACEHOLDER.to_string()),
        })
    }

    fn parse_timezone(name: &str) -> Result<Tz> {
        name.parse::<Tz>()
            .map_err(|e| anyhow!("invalid timezone '{name}': {e}"))
    }

    /// Default store: `{data_dir}/daypane/nasdaqJournal.json`
    /// - macOS:   `~/Library/Application Support/daypane`
    /// - Linux:   `$XDG_DATA_HOME/daypane` or `~/.local/share/daypane`
    /// - Windows: `%APPDATA%\daypane`
    fn default_store_path() -> PathBuf {
        let file_name = format!("{STORE_KEY}.json");
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("daypane").join(file_name)
        } else {
            PathBuf::from("./daypane").join(file_name)
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("daypane")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("daypane").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    /// Aliases that collide with a canonical keyword (eg. "today") are skipped.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Keywords::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Keywords::extend(&pairs);
                }
            }
            _ => {}
        }
    }

    /// Input formats as borrowed slices, the shape the parsing functions take.
    pub fn input_formats(&self) -> Vec<&str> {
        self.input_date_formats.iter().map(AsRef::as_ref).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::keywords::{Keyword, Keywords};
    use std::path::Path;

    /// Test helper to create a default `Config` for testing purposes.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config(store_path: PathBuf) -> Config {
        Config {
            store_path,
            editor: None,
            symbol: DEFAULT_SYMBOL.to_string(),
            chart_title: DEFAULT_CHART_TITLE.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            timezone: chrono_tz::America::Los_Angeles,
            relay: Some(DEFAULT_RELAY.to_string()),
            quote_base_url: DEFAULT_QUOTE_BASE_URL.to_string(),
            date_format: "%A, %d %b %Y".to_string(),
            input_date_formats: vec!["%Y-%m-%d".to_string()],
            note_placeholder: DEFAULT_NOTE_PLACEHOLDER.to_string(),
        }
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("daypane")
                .join("config.toml");
            let expected_native = b.config_dir().join("daypane").join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn empty_file_uses_defaults() {
        let fc = Config::parse_file("").unwrap();
        let config = Config::from_file_config(fc).unwrap();
        assert_eq!(config.symbol, "^NDX");
        assert_eq!(config.interval, "5m");
        assert_eq!(config.timezone, chrono_tz::America::Los_Angeles);
        assert_eq!(config.relay.as_deref(), Some("https://corsproxy.io/?"));
        assert!(config.store_path.ends_with("nasdaqJournal.json"));
    }

    #[test]
    fn parse_file_accepts_overrides() {
        let toml = r#"
            store_path = "/tmp/my-journal.json"
            editor = "hx"
            symbol = "^GSPC"
            timezone = "America/New_York"
            relay = ""
        "#;
        let fc = Config::parse_file(toml).unwrap();
        let config = Config::from_file_config(fc).unwrap();
        assert_eq!(config.store_path, Path::new("/tmp/my-journal.json"));
        assert_eq!(config.editor.as_deref(), Some("hx"));
        assert_eq!(config.symbol, "^GSPC");
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert!(config.relay.is_none());
    }

    #[test]
    fn invalid_timezone_is_an_error() {
        let fc = Config::parse_file(r#"timezone = "Mars/Olympus""#).unwrap();
        let err = Config::from_file_config(fc).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn synonyms_extend_registry_but_not_canonical_words() {
        let toml = r#"
            [synonyms]
            tod = "today"
            tomorrow = "yesterday"
        "#;
        let fc = Config::parse_file(toml).unwrap();
        Config::load_synonyms(&fc.synonyms);

        assert!(Keywords::matches(Keyword::Today, "tod"));
        assert!(!Keywords::matches(Keyword::Yesterday, "tomorrow"));
        assert!(Keywords::matches(Keyword::Tomorrow, "tomorrow"));
    }
}
