use crate::config::PrinterConfig;
use crate::error::TranslationError;
use crate::i18n::{
    ArrowFormat, Dictionary, DictionaryFormat, HttpTranslator, Language, RemoteTranslator,
    TranslationMetrics,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolves phrases into a target language.
///
/// Lookup order: session cache, dictionary file, remote service. Whatever
/// fails, the caller gets text back: the original phrase when no
/// translation could be found.
pub struct Translator {
    format: Box<dyn DictionaryFormat>,
    remote: Option<Box<dyn RemoteTranslator>>,
    persist: bool,
    /// Loaded dictionaries keyed by (language code, path); `None` marks a
    /// file that could not be read, so it is not retried on every message.
    dictionaries: HashMap<(String, PathBuf), Option<Dictionary>>,
    /// Resolved phrases keyed by (language code, source text)
    cache: HashMap<(String, String), String>,
    metrics: TranslationMetrics,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("format", &self.format)
            .field("remote", &self.remote.is_some())
            .field("persist", &self.persist)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Translator {
    /// Dictionary-only translator using the `source => translation` format.
    pub fn new() -> Self {
        Self {
            format: Box::new(ArrowFormat),
            remote: None,
            persist: false,
            dictionaries: HashMap::new(),
            cache: HashMap::new(),
            metrics: TranslationMetrics::new(),
        }
    }

    /// Build the translator described by a printer configuration.
    ///
    /// A remote service is attached only when a translation URL is set. A
    /// client that cannot be built is logged and left out.
    pub fn from_config(config: &PrinterConfig) -> Self {
        let mut translator = Self::new().with_persistence(config.persist_translations);

        if let Some(url) = &config.translate_url {
            match HttpTranslator::new(
                url.clone(),
                config.translate_api_key.clone(),
                config.translate_timeout,
            ) {
                Ok(remote) => translator = translator.with_remote(Box::new(remote)),
                Err(e) => warn!("Remote translation disabled: {}", e),
            }
        }

        translator
    }

    /// Fall back to `remote` for phrases the dictionary does not have.
    pub fn with_remote(mut self, remote: Box<dyn RemoteTranslator>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Read and write dictionary files in `format`.
    pub fn with_format(mut self, format: Box<dyn DictionaryFormat>) -> Self {
        self.format = format;
        self
    }

    /// Append successful remote translations to the dictionary file.
    pub fn with_persistence(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Counters for this translator's lookups.
    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Forget cached phrases and loaded dictionaries.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.dictionaries.clear();
    }

    /// Translate `text` into `lang`.
    ///
    /// Returns `text` unchanged for [`Language::Untranslated`] (without any
    /// I/O) and whenever neither the dictionary nor the remote service has
    /// a translation.
    pub fn translate(&mut self, text: &str, lang: &Language, dictionary: Option<&Path>) -> String {
        let Some(code) = lang.code() else {
            return text.to_string();
        };

        let key = (code.to_string(), text.to_string());
        if let Some(cached) = self.cache.get(&key) {
            self.metrics.record_cache_hit();
            return cached.clone();
        }
        self.metrics.record_cache_miss();

        let resolved = match self.lookup(text, code, dictionary) {
            Ok(translated) => translated,
            Err(e) => {
                debug!("No {} translation for {:?}: {}", code, text, e);
                text.to_string()
            }
        };

        self.cache.insert(key, resolved.clone());
        resolved
    }

    fn lookup(
        &mut self,
        text: &str,
        code: &str,
        dictionary: Option<&Path>,
    ) -> Result<String, TranslationError> {
        if let Some(path) = dictionary {
            let found = self
                .dictionary(code, path)
                .and_then(|d| d.get(text))
                .map(str::to_string);
            if let Some(found) = found {
                self.metrics.record_dictionary_hit();
                return Ok(found);
            }
        }

        let remote = self.remote.as_ref().ok_or(TranslationError::NotFound)?;

        self.metrics.record_remote_call();
        let translated = remote.translate(text, code).inspect_err(|_| {
            self.metrics.record_remote_failure();
        })?;

        if let (true, Some(path)) = (self.persist, dictionary) {
            self.remember(code, path, text, &translated);
        }

        Ok(translated)
    }

    /// Lazily load the dictionary for `(code, path)`.
    fn dictionary(&mut self, code: &str, path: &Path) -> Option<&Dictionary> {
        let format = self.format.as_ref();
        self.dictionaries
            .entry((code.to_string(), path.to_path_buf()))
            .or_insert_with(|| match Dictionary::load(path, format) {
                Ok(dictionary) => {
                    debug!(
                        "Loaded {} {} entries from {}",
                        dictionary.len(),
                        code,
                        path.display()
                    );
                    Some(dictionary)
                }
                Err(e) => {
                    debug!("Dictionary unavailable: {}", e);
                    None
                }
            })
            .as_ref()
    }

    fn remember(&mut self, code: &str, path: &Path, text: &str, translated: &str) {
        let line = self.format.format_line(text, translated);
        if self.format.parse_line(&line) != Some((text.to_string(), translated.to_string())) {
            debug!("Not saving {:?}: the dictionary format cannot hold it", text);
            return;
        }

        if let Err(e) = Dictionary::append(path, self.format.as_ref(), text, translated) {
            warn!("{}", e);
            return;
        }

        self.dictionaries
            .entry((code.to_string(), path.to_path_buf()))
            .or_insert(None)
            .get_or_insert_with(Dictionary::default)
            .insert(text, translated);
    }
}
