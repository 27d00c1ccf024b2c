//! The message printer.
//!
//! Every call runs the same steps: pick the prefix for the message kind,
//! translate the text when a language is configured, write the line with
//! colors to the output, and mirror the plain line to the log.

use crate::config::PrinterConfig;
use crate::error::{MapError, TableError};
use crate::kind::{self, MessageKind};
use crate::log_sink::LogSink;
use crate::map::{Point, WorldMap};
use crate::markup;
use crate::table::render_table;
use crate::translation::Translator;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Per-call formatting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Markup written before the prefix
    pub start: String,
    /// Markup written after the text
    pub end: String,
    /// Whether the text goes through the translator
    pub translate: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            start: String::new(),
            end: "%newline".to_string(),
            translate: true,
        }
    }
}

impl PrintOptions {
    /// Options that print the text exactly as given.
    pub fn untranslated() -> Self {
        Self {
            translate: false,
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }
}

/// Prints status messages to an output stream, reading answers from an
/// input stream.
///
/// `MessagePrinter::new` uses the process's stdout and stdin; tests and
/// embedders can supply any writer and reader through
/// [`MessagePrinter::with_io`].
pub struct MessagePrinter<O = io::Stdout, I = io::StdinLock<'static>> {
    config: PrinterConfig,
    translator: Translator,
    log: LogSink,
    output: O,
    input: I,
}

impl MessagePrinter {
    pub fn new(config: PrinterConfig) -> Self {
        Self::with_io(config, io::stdout(), io::stdin().lock())
    }
}

impl<O: Write, I: BufRead> MessagePrinter<O, I> {
    pub fn with_io(config: PrinterConfig, output: O, input: I) -> Self {
        let translator = Translator::from_config(&config);
        Self::with_translator(config, translator, output, input)
    }

    /// Build a printer around an existing translator.
    pub fn with_translator(
        config: PrinterConfig,
        translator: Translator,
        output: O,
        input: I,
    ) -> Self {
        let log = LogSink::open(&config.log_path, config.logging);
        Self {
            config,
            translator,
            log,
            output,
            input,
        }
    }

    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Print `text` as a message of `kind`.
    pub fn print(&mut self, kind: MessageKind, text: &str) {
        self.print_with(kind, text, &PrintOptions::default());
    }

    pub fn print_with(&mut self, kind: MessageKind, text: &str, options: &PrintOptions) {
        let (styled, plain) = self.compose(kind, text, options.translate);

        let rendered = format!(
            "{}{}{}",
            markup::render(&options.start),
            styled,
            markup::render(&options.end)
        );
        self.emit(&rendered);

        let logged = format!(
            "{}{}{}",
            markup::strip(&options.start),
            plain,
            markup::strip(&options.end)
        );
        self.log.write_line(logged.trim_matches('\n'));
    }

    pub fn print_empty(&mut self, text: &str) {
        self.print(MessageKind::Empty, text);
    }

    pub fn print_usage(&mut self, text: &str) {
        self.print(MessageKind::Usage, text);
    }

    pub fn print_process(&mut self, text: &str) {
        self.print(MessageKind::Process, text);
    }

    pub fn print_success(&mut self, text: &str) {
        self.print(MessageKind::Success, text);
    }

    pub fn print_error(&mut self, text: &str) {
        self.print(MessageKind::Error, text);
    }

    pub fn print_warning(&mut self, text: &str) {
        self.print(MessageKind::Warning, text);
    }

    pub fn print_information(&mut self, text: &str) {
        self.print(MessageKind::Info, text);
    }

    /// Ask a question and block until a line of input arrives.
    ///
    /// Returns the line without its terminator, or `None` once the input is
    /// closed.
    pub fn ask(&mut self, text: &str) -> Option<String> {
        self.prompt(MessageKind::Question, text)
    }

    /// Same as [`ask`](Self::ask) with the `[>]` prefix.
    pub fn ask_arrow(&mut self, text: &str) -> Option<String> {
        self.prompt(MessageKind::Arrow, text)
    }

    /// Read one line after writing an already composed prompt.
    ///
    /// The prompt is markup; it is neither prefixed nor translated.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.emit(&markup::render(prompt));
        let answer = self.read_answer();

        let plain = markup::strip(prompt);
        match &answer {
            Some(answer) => self.log.write_line(&format!("{}{}", plain, answer)),
            None => self.log.write_line(&plain),
        }
        answer
    }

    /// Print a titled table.
    pub fn print_table<S: AsRef<str>>(
        &mut self,
        name: &str,
        headers: &[&str],
        rows: &[Vec<S>],
    ) -> Result<(), TableError> {
        let name = self.translate(name);
        let table = render_table(&name, headers, rows)?;
        self.print_block(&table);
        Ok(())
    }

    /// Print the world map with `points` marked.
    pub fn print_map(&mut self, points: &[Point]) -> Result<(), MapError> {
        let map = WorldMap::new().render(points)?;
        self.print_block(&map);
        Ok(())
    }

    fn print_block(&mut self, block: &str) {
        let options = PrintOptions::untranslated();
        for line in block.lines() {
            self.print_with(MessageKind::Empty, line, &options);
        }
    }

    fn prompt(&mut self, kind: MessageKind, text: &str) -> Option<String> {
        let (styled, plain) = self.compose(kind, text, true);
        self.emit(&styled);
        let answer = self.read_answer();

        match &answer {
            Some(answer) => self.log.write_line(&format!("{}{}", plain, answer)),
            None => self.log.write_line(&plain),
        }
        answer
    }

    /// Next input line without its terminator; `None` only at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than treated as the
    /// end of input.
    fn read_answer(&mut self) -> Option<String> {
        let mut line = Vec::new();
        match self.input.read_until(b'\n', &mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with(b"\n") {
                    line.pop();
                    if line.ends_with(b"\r") {
                        line.pop();
                    }
                }
                Some(String::from_utf8_lossy(&line).into_owned())
            }
            Err(e) => {
                debug!("Reading input failed: {}", e);
                None
            }
        }
    }

    fn translate(&mut self, text: &str) -> String {
        self.translator.translate(
            text,
            &self.config.language,
            self.config.dictionary.as_deref(),
        )
    }

    /// Translate the text between markup tokens, leaving the tokens and the
    /// whitespace around each piece of text in place.
    fn translate_markup(&mut self, text: &str) -> String {
        let translator = &mut self.translator;
        let language = &self.config.language;
        let dictionary = self.config.dictionary.as_deref();

        markup::map_text(text, |piece| {
            let phrase = piece.trim();
            if phrase.is_empty() {
                return piece.to_string();
            }
            let leading = &piece[..piece.len() - piece.trim_start().len()];
            let trailing = &piece[piece.trim_end().len()..];
            format!(
                "{}{}{}",
                leading,
                translator.translate(phrase, language, dictionary),
                trailing
            )
        })
    }

    /// Build the colored and the plain variant of one message line.
    fn compose(&mut self, kind: MessageKind, text: &str, translate: bool) -> (String, String) {
        let prefix = kind::resolve(kind);
        let text = if translate {
            self.translate_markup(text)
        } else {
            text.to_string()
        };

        if prefix.is_empty() {
            (markup::render(&text), markup::strip(&text))
        } else {
            (
                format!("{} {}", prefix.styled(), markup::render(&text)),
                format!("{} {}", prefix.plain(), markup::strip(&text)),
            )
        }
    }

    // A closed or broken output must not take the host down with it.
    fn emit(&mut self, text: &str) {
        if let Err(e) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
        {
            debug!("Writing to output failed: {}", e);
        }
    }
}
