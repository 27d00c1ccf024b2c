//! Internationalization (i18n) building blocks.
//!
//! # Architecture
//!
//! - `language`: target language, or the "do not translate" sentinel
//! - `dictionary`: local phrase tables and their on-disk line formats
//! - `remote`: remote translation services
//! - `metrics`: per-translator counters
//!
//! The [`Translator`](crate::translation::Translator) ties these together.

mod dictionary;
mod language;
mod metrics;
mod remote;

pub use dictionary::{ArrowFormat, ColonFormat, Dictionary, DictionaryFormat};
pub use language::{Language, UNTRANSLATED};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use remote::{HttpTranslator, RemoteTranslator};
