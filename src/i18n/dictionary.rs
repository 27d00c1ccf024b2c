//! Dictionary files: local phrase-to-translation tables.
//!
//! A dictionary holds translations for a single target language, one entry
//! per line. The on-disk line layout is a [`DictionaryFormat`], so legacy
//! files can be read without converting them.

use crate::error::TranslationError;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Line layout of a dictionary file.
pub trait DictionaryFormat: std::fmt::Debug {
    /// Split one line into `(source, translation)`.
    ///
    /// Returns `None` for lines that carry no entry (blank, comment, or
    /// malformed). Such lines are skipped, never fatal.
    fn parse_line(&self, line: &str) -> Option<(String, String)>;

    /// Render one entry as a line, without the line terminator.
    ///
    /// `parse_line` of the result gives back exactly `(source, translation)`.
    fn format_line(&self, source: &str, translation: &str) -> String;
}

/// `source phrase => translated phrase`, with `#` comment lines.
///
/// Both sides may contain spaces and colons; the first unescaped ` => `
/// separates them. Whitespace around each side is ignored unless escaped.
///
/// Escapes: `\\`, `\n`, `\r`, `\t`, `\s` (a space), and a backslash before
/// any other character keeps that character literally. Saved entries escape
/// `=>`, line breaks, tabs, a leading `#` and spaces at either end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowFormat;

const ARROW: &str = " => ";

impl DictionaryFormat for ArrowFormat {
    fn parse_line(&self, line: &str) -> Option<(String, String)> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim_start().starts_with('#') {
            return None;
        }
        let (source, translation) = split_unescaped(line, ARROW)?;
        let (source, translation) = (trim_blanks(source), trim_blanks(translation));
        if source.is_empty() || translation.is_empty() {
            return None;
        }
        Some((unescape(source), unescape(translation)))
    }

    fn format_line(&self, source: &str, translation: &str) -> String {
        let mut source = escape(source).replace("=>", "=\\>");
        if source.starts_with('#') {
            source.insert(0, '\\');
        }
        let translation = escape(translation).replace("=>", "=\\>");
        format!("{}{}{}", source, ARROW, translation)
    }
}

/// `source phrase:translated phrase`, split at the first unescaped colon.
///
/// Saved sources escape their colons as `\:`; the escapes are the same as
/// for [`ArrowFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ColonFormat;

impl DictionaryFormat for ColonFormat {
    fn parse_line(&self, line: &str) -> Option<(String, String)> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (source, translation) = split_unescaped(line, ":")?;
        let translation = trim_blanks(translation);
        if source.is_empty() || translation.is_empty() {
            return None;
        }
        Some((unescape(source), unescape(translation)))
    }

    fn format_line(&self, source: &str, translation: &str) -> String {
        format!(
            "{}:{}",
            escape(source).replace(':', "\\:"),
            escape(translation)
        )
    }
}

fn trim_blanks(text: &str) -> &str {
    text.trim_matches([' ', '\t'])
}

/// Split at the first `separator` that is not part of an escape sequence.
fn split_unescaped<'a>(line: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if line[i..].starts_with(separator) {
            return Some((&line[..i], &line[i + separator.len()..]));
        }
    }
    None
}

fn escape(text: &str) -> String {
    let last = text.chars().count().saturating_sub(1);
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if i == 0 || i == last => out.push_str("\\s"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('s') => out.push(' '),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Entries of one dictionary file, loaded in full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Load every well-formed entry from `path`.
    ///
    /// Later lines override earlier ones for the same source phrase, so
    /// appended corrections take effect.
    pub fn load(path: &Path, format: &dyn DictionaryFormat) -> Result<Self, TranslationError> {
        let content =
            fs::read_to_string(path).map_err(|source| TranslationError::DictionaryRead {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(&content, format))
    }

    pub fn parse(content: &str, format: &dyn DictionaryFormat) -> Self {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for line in content.lines() {
            match format.parse_line(line) {
                Some((source, translation)) => {
                    entries.insert(source, translation);
                }
                None if line.trim().is_empty() => {}
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} unparseable dictionary lines", skipped);
        }
        Self { entries }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn insert(&mut self, source: impl Into<String>, translation: impl Into<String>) {
        self.entries.insert(source.into(), translation.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append one entry to the file at `path`, creating it if needed.
    pub fn append(
        path: &Path,
        format: &dyn DictionaryFormat,
        source: &str,
        translation: &str,
    ) -> Result<(), TranslationError> {
        let write_err = |source| TranslationError::DictionaryWrite {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_err)?;
        writeln!(file, "{}", format.format_line(source, translation)).map_err(write_err)?;
        file.flush().map_err(write_err)
    }
}
