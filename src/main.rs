//! Interactive demo shell.
//!
//! Configuration comes from the environment (and `.env`):
//! - BADGES_LANG, BADGES_DICTIONARY, BADGES_PERSIST_TRANSLATIONS
//! - BADGES_TRANSLATE_URL, BADGES_TRANSLATE_API_KEY, BADGES_TRANSLATE_TIMEOUT_SECS
//! - BADGES_LOG, BADGES_LOG_PATH

use anyhow::Result;
use badges::{
    Command, CommandInfo, CommandOption, MessageKind, MessagePrinter, Point, PrintOptions,
    PrinterConfig, Shell,
};
use std::io::{BufRead, Write};
use tracing::info;

struct Say {
    info: CommandInfo,
}

impl Say {
    fn new() -> Self {
        let kinds: Vec<&str> = MessageKind::all().iter().map(|k| k.name()).collect();
        Self {
            info: CommandInfo::new("say", "output")
                .description("Print a message of the given kind.")
                .usage(format!("say <{}> <message>", kinds.join("|")))
                .min_args(2),
        }
    }
}

impl<O: Write, I: BufRead> Command<O, I> for Say {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn run(&mut self, args: &[String], printer: &mut MessagePrinter<O, I>) {
        match MessageKind::from_name(&args[1]) {
            Some(kind) => printer.print(kind, &args[2..].join(" ")),
            None => printer.print_error(&format!("Unknown message kind: {}", args[1])),
        }
    }
}

struct Ask {
    info: CommandInfo,
}

impl<O: Write, I: BufRead> Command<O, I> for Ask {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn run(&mut self, args: &[String], printer: &mut MessagePrinter<O, I>) {
        let question = format!("{} ", args[1..].join(" "));
        match printer.ask(&question) {
            Some(answer) => printer.print_information(&format!("You answered: {}", answer)),
            None => printer.print_warning("No answer, input closed."),
        }
    }
}

struct Plot {
    info: CommandInfo,
}

impl<O: Write, I: BufRead> Command<O, I> for Plot {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn run(&mut self, args: &[String], printer: &mut MessagePrinter<O, I>) {
        let (marker, coordinates) = match args[1].as_str() {
            "-m" => match args[2].chars().next() {
                Some(marker) => (marker, &args[3..]),
                None => (badges::map::DEFAULT_MARKER, &args[3..]),
            },
            _ => (badges::map::DEFAULT_MARKER, &args[1..]),
        };

        if coordinates.is_empty() || coordinates.len() % 2 != 0 {
            printer.print_error("Coordinates come in <lat> <lon> pairs.");
            return;
        }

        let mut points = Vec::with_capacity(coordinates.len() / 2);
        for pair in coordinates.chunks(2) {
            match (pair[0].parse::<f64>(), pair[1].parse::<f64>()) {
                (Ok(latitude), Ok(longitude)) => {
                    points.push(Point::new(latitude, longitude).with_marker(marker))
                }
                _ => {
                    printer.print_error(&format!("Not a coordinate: {} {}", pair[0], pair[1]));
                    return;
                }
            }
        }

        if let Err(e) = printer.print_map(&points) {
            printer.print_error(&e.to_string());
        }
    }
}

struct Stats {
    info: CommandInfo,
}

impl<O: Write, I: BufRead> Command<O, I> for Stats {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn run(&mut self, args: &[String], printer: &mut MessagePrinter<O, I>) {
        let report = printer.translator().metrics().report();

        if args.get(1).map(String::as_str) == Some("--json") {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => printer.print_with(
                    MessageKind::Empty,
                    &json,
                    &PrintOptions::untranslated(),
                ),
                Err(e) => printer.print_error(&format!("Failed to serialize stats: {}", e)),
            }
            return;
        }

        let rows = vec![
            vec!["Cache hits".to_string(), report.cache_hits.to_string()],
            vec!["Cache misses".to_string(), report.cache_misses.to_string()],
            vec![
                "Cache hit rate".to_string(),
                format!("{:.1}%", report.cache_hit_rate),
            ],
            vec![
                "Dictionary hits".to_string(),
                report.dictionary_hits.to_string(),
            ],
            vec!["Remote calls".to_string(), report.remote_calls.to_string()],
            vec![
                "Remote failures".to_string(),
                report.remote_failures.to_string(),
            ],
        ];

        if let Err(e) = printer.print_table("Translation", &["Metric", "Value"], &rows) {
            printer.print_error(&e.to_string());
        }
    }
}

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Diagnostics go to stderr so they never mix with shell output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("badges=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = PrinterConfig::from_env()?;
    info!(
        "Starting badges shell (language: {}, logging: {})",
        config.language, config.logging
    );

    let printer = MessagePrinter::new(config);
    let mut shell = Shell::new(printer)
        .with_prompt("%red$ %end")
        .with_intro("%newline%bold%whiteBadges Command-Line Interface%end%newline");

    shell.add_command(Box::new(Say::new()));
    shell.add_command(Box::new(Ask {
        info: CommandInfo::new("ask", "input")
            .description("Ask a question and echo the answer.")
            .usage("ask <question>")
            .min_args(1),
    }));
    shell.add_command(Box::new(Plot {
        info: CommandInfo::new("plot", "map")
            .description("Plot coordinates on the world map.")
            .usage("plot [-m <marker>] <lat> <lon> [<lat> <lon> ...]")
            .min_args(2),
    }));
    shell.add_command(Box::new(Stats {
        info: CommandInfo::new("stats", "translation")
            .description("Show translation statistics.")
            .usage("stats [--json]")
            .option(CommandOption::new("--json", "", "Print as JSON.")),
    }));

    shell.run_loop();

    info!("Shell closed");
    Ok(())
}
