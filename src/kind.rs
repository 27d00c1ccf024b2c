//! Message kinds and their display prefixes.
//!
//! Every printed line starts with a short glyph that tells the reader what
//! kind of message it is (`[*]`, `[-]`, `[!]`, ...). The mapping is fixed and
//! total over [`MessageKind`].

use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};

/// Category of a printed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
    Warning,
    Info,
    Question,
    Process,
    /// Input prompt for free-form answers (`[>]`)
    Arrow,
    /// Command usage lines (`Usage: `)
    Usage,
    /// No prefix at all
    Empty,
}

impl MessageKind {
    /// All kinds, in display order.
    pub fn all() -> &'static [MessageKind] {
        &[
            MessageKind::Success,
            MessageKind::Error,
            MessageKind::Warning,
            MessageKind::Info,
            MessageKind::Question,
            MessageKind::Process,
            MessageKind::Arrow,
            MessageKind::Usage,
            MessageKind::Empty,
        ]
    }

    /// Lowercase name used on the command line and in config.
    pub fn name(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Warning => "warning",
            MessageKind::Info => "info",
            MessageKind::Question => "question",
            MessageKind::Process => "process",
            MessageKind::Arrow => "arrow",
            MessageKind::Usage => "usage",
            MessageKind::Empty => "empty",
        }
    }

    /// Parse a kind from its name. Case-insensitive; `information` is
    /// accepted as an alias of `info`.
    pub fn from_name(name: &str) -> Option<MessageKind> {
        match name.to_ascii_lowercase().as_str() {
            "success" => Some(MessageKind::Success),
            "error" => Some(MessageKind::Error),
            "warning" => Some(MessageKind::Warning),
            "info" | "information" => Some(MessageKind::Info),
            "question" => Some(MessageKind::Question),
            "process" => Some(MessageKind::Process),
            "arrow" => Some(MessageKind::Arrow),
            "usage" => Some(MessageKind::Usage),
            "empty" => Some(MessageKind::Empty),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Display prefix of a message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    glyph: &'static str,
    color: Option<Color>,
}

impl Prefix {
    const fn new(glyph: &'static str, color: Option<Color>) -> Self {
        Self { glyph, color }
    }

    /// The glyph without any color sequences, as written to the log.
    pub fn plain(&self) -> &'static str {
        self.glyph
    }

    /// The glyph with color sequences.
    ///
    /// Rendering goes through `colored`, so `NO_COLOR`, `CLICOLOR` and a
    /// non-terminal stdout turn the sequences off.
    pub fn styled(&self) -> String {
        match self.color {
            Some(color) => self.glyph.color(color).bold().to_string(),
            None => self.glyph.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glyph.is_empty()
    }
}

/// Map a message kind to its fixed prefix.
pub fn resolve(kind: MessageKind) -> Prefix {
    match kind {
        MessageKind::Success => Prefix::new("[*]", Some(Color::Green)),
        MessageKind::Process => Prefix::new("[~]", Some(Color::Blue)),
        MessageKind::Error => Prefix::new("[-]", Some(Color::Red)),
        MessageKind::Warning => Prefix::new("[!]", Some(Color::Yellow)),
        MessageKind::Info => Prefix::new("[i]", Some(Color::White)),
        MessageKind::Question => Prefix::new("[?]", Some(Color::White)),
        MessageKind::Arrow => Prefix::new("[>]", Some(Color::White)),
        MessageKind::Usage => Prefix::new("Usage:", None),
        MessageKind::Empty => Prefix::new("", None),
    }
}
