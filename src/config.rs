use crate::i18n::Language;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Log file used when logging is enabled without an explicit path
pub const DEFAULT_LOG_PATH: &str = "badges.log";

/// Remote translation timeout used when none is configured
pub const DEFAULT_TRANSLATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Printer configuration, built once and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PrinterConfig {
    // Translation
    pub language: Language,
    pub dictionary: Option<PathBuf>,
    pub persist_translations: bool,

    // Remote translation service
    pub translate_url: Option<String>,
    pub translate_api_key: Option<String>,
    pub translate_timeout: Duration,

    // Logging
    pub logging: bool,
    pub log_path: PathBuf,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            language: Language::Untranslated,
            dictionary: None,
            persist_translations: true,
            translate_url: None,
            translate_api_key: None,
            translate_timeout: DEFAULT_TRANSLATE_TIMEOUT,
            logging: false,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl PrinterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            // Translation
            language: Language::parse(&std::env::var("BADGES_LANG").unwrap_or_default()),
            dictionary: std::env::var("BADGES_DICTIONARY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            persist_translations: match std::env::var("BADGES_PERSIST_TRANSLATIONS") {
                Ok(v) => parse_flag(&v).context("BADGES_PERSIST_TRANSLATIONS is not a boolean")?,
                Err(_) => defaults.persist_translations,
            },

            // Remote translation service
            translate_url: std::env::var("BADGES_TRANSLATE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            translate_api_key: std::env::var("BADGES_TRANSLATE_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            translate_timeout: match std::env::var("BADGES_TRANSLATE_TIMEOUT_SECS") {
                Ok(v) => Duration::from_secs(
                    v.trim()
                        .parse()
                        .context("BADGES_TRANSLATE_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                Err(_) => defaults.translate_timeout,
            },

            // Logging
            logging: match std::env::var("BADGES_LOG") {
                Ok(v) => parse_flag(&v).context("BADGES_LOG is not a boolean")?,
                Err(_) => defaults.logging,
            },
            log_path: std::env::var("BADGES_LOG_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_path),
        })
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_dictionary(mut self, path: impl AsRef<Path>) -> Self {
        self.dictionary = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_persist_translations(mut self, persist: bool) -> Self {
        self.persist_translations = persist;
        self
    }

    pub fn with_translate_url(mut self, url: impl Into<String>) -> Self {
        self.translate_url = Some(url.into());
        self
    }

    pub fn with_translate_api_key(mut self, key: impl Into<String>) -> Self {
        self.translate_api_key = Some(key.into());
        self
    }

    pub fn with_translate_timeout(mut self, timeout: Duration) -> Self {
        self.translate_timeout = timeout;
        self
    }

    /// Enable logging to `path`.
    pub fn with_log_file(mut self, path: impl AsRef<Path>) -> Self {
        self.logging = true;
        self.log_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}
