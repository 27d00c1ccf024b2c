//! Inline `%token` markup and ANSI stripping.
//!
//! Markup strings such as `"%bold%red$ %end"` describe styled text without
//! embedding escape sequences. Styles accumulate from token to token until
//! `%end` resets them. Words that start with `%` but are not known tokens are
//! kept as literal text.

use colored::{Color, Colorize};
use regex::Regex;
use std::sync::OnceLock;

/// ANSI CSI sequences (colors, cursor movement, erase)
static ANSI_RE: OnceLock<Regex> = OnceLock::new();

/// Known markup tokens.
const TOKENS: &[&str] = &[
    "%underline",
    "%newline",
    "%italic",
    "%yellow",
    "%purple",
    "%remove",
    "%black",
    "%green",
    "%white",
    "%bold",
    "%dark",
    "%blue",
    "%cyan",
    "%red",
    "%end",
    "%tab",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Style {
    bold: bool,
    dimmed: bool,
    italic: bool,
    underline: bool,
    color: Option<Color>,
}

impl Style {
    fn apply(&self, text: &str) -> String {
        if *self == Style::default() {
            return text.to_string();
        }

        let mut styled = match self.color {
            Some(color) => text.color(color),
            None => text.normal(),
        };
        if self.bold {
            styled = styled.bold();
        }
        if self.dimmed {
            styled = styled.dimmed();
        }
        if self.italic {
            styled = styled.italic();
        }
        if self.underline {
            styled = styled.underline();
        }
        styled.to_string()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Token(&'static str),
}

fn tokenize(markup: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = markup;

    while let Some(pos) = rest.find('%') {
        let (before, after) = rest.split_at(pos);
        if !before.is_empty() {
            pieces.push(Piece::Text(before));
        }

        match TOKENS.iter().find(|token| after.starts_with(**token)) {
            Some(token) => {
                pieces.push(Piece::Token(*token));
                rest = &after[token.len()..];
            }
            None => {
                pieces.push(Piece::Text("%"));
                rest = &after[1..];
            }
        }
    }

    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }
    pieces
}

/// Render markup into text with ANSI color sequences.
///
/// Color output follows `colored`'s own detection, so with colors disabled
/// the result equals [`strip`].
pub fn render(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut style = Style::default();

    for piece in tokenize(markup) {
        match piece {
            Piece::Text(text) => out.push_str(&style.apply(text)),
            Piece::Token(token) => match token {
                "%end" => style = Style::default(),
                "%newline" => out.push('\n'),
                "%tab" => out.push('\t'),
                "%remove" => {}
                "%bold" => style.bold = true,
                "%dark" => style.dimmed = true,
                "%italic" => style.italic = true,
                "%underline" => style.underline = true,
                color => style.color = token_color(color),
            },
        }
    }
    out
}

/// Remove every markup token, keeping only the text they style.
pub fn strip(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for piece in tokenize(markup) {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Token("%newline") => out.push('\n'),
            Piece::Token("%tab") => out.push('\t'),
            Piece::Token(_) => {}
        }
    }
    out
}

/// Rewrite the text between tokens, keeping every token as written.
///
/// Adjacent text pieces are joined first, so `f` sees `100% done` whole
/// rather than split at the literal `%`.
pub fn map_text(markup: &str, mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut text = String::new();

    for piece in tokenize(markup) {
        match piece {
            Piece::Text(t) => text.push_str(t),
            Piece::Token(token) => {
                if !text.is_empty() {
                    out.push_str(&f(&text));
                    text.clear();
                }
                out.push_str(token);
            }
        }
    }
    if !text.is_empty() {
        out.push_str(&f(&text));
    }
    out
}

/// Remove ANSI escape sequences from already rendered text.
pub fn strip_ansi(text: &str) -> String {
    let re = ANSI_RE.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ANSI pattern is valid")
    });
    re.replace_all(text, "").into_owned()
}

/// Number of characters a terminal would show for `text`.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

fn token_color(token: &str) -> Option<Color> {
    match token {
        "%black" => Some(Color::Black),
        "%red" => Some(Color::Red),
        "%green" => Some(Color::Green),
        "%yellow" => Some(Color::Yellow),
        "%blue" => Some(Color::Blue),
        "%purple" => Some(Color::Magenta),
        "%cyan" => Some(Color::Cyan),
        "%white" => Some(Color::White),
        _ => None,
    }
}
