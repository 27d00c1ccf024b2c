//! Optional append-only log file.
//!
//! A disabled sink never touches the filesystem. An enabled sink owns its
//! file handle until it is dropped. Write failures are reported once on
//! standard error and never interrupt printing.

use crate::markup::strip_ansi;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
enum State {
    Inert,
    Open { file: File, path: PathBuf },
    /// The file could not be opened; nothing will be written.
    Unavailable { path: PathBuf },
}

#[derive(Debug)]
pub struct LogSink {
    state: State,
    failures: usize,
}

impl LogSink {
    /// Open the log at `path` in append mode, creating it if absent.
    ///
    /// With `enabled == false` the returned sink is inert and `path` is
    /// never touched.
    pub fn open(path: impl AsRef<Path>, enabled: bool) -> Self {
        if !enabled {
            return Self::inert();
        }

        let path = path.as_ref().to_path_buf();
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                debug!("Logging to {}", path.display());
                Self {
                    state: State::Open { file, path },
                    failures: 0,
                }
            }
            Err(e) => {
                let mut sink = Self {
                    state: State::Unavailable { path },
                    failures: 0,
                };
                sink.report(&e);
                sink
            }
        }
    }

    /// A sink that discards every line.
    pub fn inert() -> Self {
        Self {
            state: State::Inert,
            failures: 0,
        }
    }

    /// Append `text` as one line, without color sequences.
    ///
    /// Line breaks inside `text` are written as `\n` so every message stays
    /// on a single line of the file.
    pub fn write_line(&mut self, text: &str) {
        let result = match &mut self.state {
            State::Inert | State::Unavailable { .. } => return,
            State::Open { file, .. } => {
                let plain = strip_ansi(text).replace('\n', "\\n");
                writeln!(file, "{}", plain).and_then(|_| file.flush())
            }
        };

        if let Err(e) = result {
            self.report(&e);
        }
    }

    /// Whether lines are currently being written to a file.
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Open { .. })
    }

    /// Path the sink was opened with; `None` for an inert sink.
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            State::Inert => None,
            State::Open { path, .. } | State::Unavailable { path } => Some(path),
        }
    }

    /// Number of failed open/write attempts so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    fn report(&mut self, error: &io::Error) {
        self.failures += 1;
        debug!("Log write failure #{}: {}", self.failures, error);

        if self.failures == 1 {
            let path = self
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            eprintln!("[!] Logging to {} failed: {}", path, error);
        }
    }
}
