//! Display languages and the translation dictionary.
//!
//! The dictionary is a static JSON asset compiled into the binary. Each
//! supported language maps to one [`Translations`] record; lookups for a
//! language without a record fall back to [`Language::DEFAULT`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::warn;

use crate::errors::{DictionaryError, SearchError};

#[cfg(test)]
#[path = "i18n_tests.rs"]
mod tests;

const EMBEDDED_TRANSLATIONS: &str = include_str!("../assets/translations.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Pt,
    Es,
}

impl Language {
    pub const DEFAULT: Language = Language::Pt;

    /// Selector order.
    pub const ALL: [Language; 3] = [Language::En, Language::Pt, Language::Es];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
            Language::Es => "es",
        }
    }

    pub fn index(self) -> usize {
        Language::ALL
            .iter()
            .position(|lang| *lang == self)
            .unwrap_or_default()
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code '{0}'")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            "es" => Ok(Language::Es),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Display strings for one language.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Translations {
    pub title: String,
    pub input_placeholder: String,
    pub search: String,
    pub loading: String,
    #[serde(rename = "textErrorGitHubUserRequired")]
    pub username_required: String,
    pub not_found: String,
    pub try_again: String,
    pub followers: String,
    pub following: String,
    pub repositories: String,
    pub view_profile: String,
    pub toggle_theme: String,
    #[serde(default)]
    menu: HashMap<String, String>,
}

impl Translations {
    /// Label for `lang` in the language selector, or its code when unlabelled.
    pub fn menu_label(&self, lang: Language) -> &str {
        self.menu
            .get(lang.code())
            .map(String::as_str)
            .unwrap_or(lang.code())
    }

    /// The one message shown for a failed search.
    pub fn search_error(&self, err: &SearchError) -> &str {
        match err {
            SearchError::EmptyInput => &self.username_required,
            SearchError::LookupFailure(_) => &self.not_found,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Dictionary {
    entries: HashMap<Language, Translations>,
    fallback: Translations,
}

impl Dictionary {
    /// The dictionary compiled into the binary.
    pub fn embedded() -> Result<Self, DictionaryError> {
        Self::from_json(EMBEDDED_TRANSLATIONS)
    }

    /// Parses a `{ "<code>": { ...strings } }` document. Unknown codes are skipped.
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let raw: HashMap<String, Translations> = serde_json::from_str(json)?;

        let mut entries = HashMap::new();
        for (code, translations) in raw {
            match code.parse::<Language>() {
                Ok(lang) => {
                    entries.insert(lang, translations);
                }
                Err(err) => warn!(%err, "skipping translations"),
            }
        }

        let fallback = entries
            .get(&Language::DEFAULT)
            .cloned()
            .ok_or(DictionaryError::MissingDefault(Language::DEFAULT.code()))?;

        Ok(Self { entries, fallback })
    }

    pub fn get(&self, lang: Language) -> &Translations {
        self.entries.get(&lang).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, lang: Language) -> bool {
        self.entries.contains_key(&lang)
    }
}
