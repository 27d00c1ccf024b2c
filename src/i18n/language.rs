//! Language type: target language of a printer, or the "do not translate"
//! sentinel.

use serde::{Deserialize, Serialize};

/// Sentinel spelling that means "do not translate".
pub const UNTRANSLATED: &str = "none";

/// Target language for printed messages.
///
/// Codes are free-form (ISO 639-1 such as `ru` or `es` is typical); they
/// are passed through to the dictionary cache and the remote service as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Print messages exactly as given
    #[default]
    Untranslated,
    /// Translate messages into this language code
    Code(String),
}

impl Language {
    /// Parse a language preference.
    ///
    /// Empty input and `none` (any case) give [`Language::Untranslated`];
    /// anything else is a lowercase language code.
    pub fn parse(value: &str) -> Language {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(UNTRANSLATED) {
            Language::Untranslated
        } else {
            Language::Code(value.to_ascii_lowercase())
        }
    }

    /// Language code, or `None` for the sentinel.
    pub fn code(&self) -> Option<&str> {
        match self {
            Language::Untranslated => None,
            Language::Code(code) => Some(code),
        }
    }

    pub fn is_untranslated(&self) -> bool {
        matches!(self, Language::Untranslated)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Untranslated => write!(f, "{}", UNTRANSLATED),
            Language::Code(code) => write!(f, "{}", code),
        }
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        Language::parse(value)
    }
}
