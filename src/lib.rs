//! Console status messages.
//!
//! A [`MessagePrinter`] writes lines such as `[*] Done` or `[-] Failed`
//! with colored prefixes, optionally translating the text through a
//! dictionary file or a remote service and mirroring every line to a log
//! file. Tables, an ASCII world map and a small command shell are built on
//! the same printer.
//!
//! ```no_run
//! use badges::{MessageKind, MessagePrinter, PrinterConfig};
//!
//! let mut printer = MessagePrinter::new(PrinterConfig::new().with_log_file("session.log"));
//! printer.print(MessageKind::Success, "Hello, world!");
//! if printer.ask("Continue? [y/N]: ").as_deref() == Some("y") {
//!     printer.print_process("Continuing");
//! }
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod kind;
pub mod log_sink;
pub mod map;
pub mod markup;
pub mod printer;
pub mod shell;
pub mod table;
pub mod translation;

pub use config::PrinterConfig;
pub use error::{MapError, ShellError, TableError, TranslationError};
pub use i18n::Language;
pub use kind::{resolve, MessageKind, Prefix};
pub use log_sink::LogSink;
pub use map::{Point, WorldMap};
pub use printer::{MessagePrinter, PrintOptions};
pub use shell::{Command, CommandInfo, CommandOption, FnCommand, Shell};
pub use table::render_table;
pub use translation::Translator;
