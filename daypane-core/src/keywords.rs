use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Words that name a journal day relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Today,
    Yesterday,
    Tomorrow,
}

pub struct Keywords;

impl Keywords {
    /// Returns the global keyword registry (input -> canonical).
    ///
    /// Initialized once on first access and seeded with every canonical word mapped to
    /// itself. Keys are stored lowercased so lookups are case-insensitive.
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let m = Keyword::iter()
                .map(|k| (k.as_ref().to_string(), k))
                .collect::<HashMap<_, _>>();
            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined synonyms.
    ///
    /// Each pair is `(alias, target)`. The target must already be known to the registry,
    /// otherwise the pair is ignored.
    ///
    /// ```toml
    /// [synonyms]
    /// ytd  = "yesterday"
    /// hoy  = "today"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) {
        let Ok(mut reg) = Self::registry().write() else {
            return;
        };
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.insert(alias.to_ascii_lowercase(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical word (eg "today").
    pub fn is_canonical(word: &str) -> bool {
        let word = word.to_ascii_lowercase();
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Returns `true` if `input` equals (case-insensitively) the given keyword or any
    /// of its registered synonyms.
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        let Ok(reg) = Self::registry().read() else {
            return false;
        };
        reg.get(&input.trim().to_ascii_lowercase())
            .map(|&canon| canon == keyword)
            .unwrap_or(false)
    }
}
