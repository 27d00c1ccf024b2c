//! Line-oriented command shell on top of [`MessagePrinter`].
//!
//! Commands register a [`CommandInfo`] describing their name, category,
//! usage and options. Typed words resolve to a command by exact name or by
//! an unambiguous prefix (`pl` runs `plot` when nothing else starts with
//! `pl`). Arguments are checked against the info before the command runs.

use crate::error::ShellError;
use crate::kind::MessageKind;
use crate::printer::{MessagePrinter, PrintOptions};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Category of the built-in commands in `help` output.
pub const CORE_CATEGORY: &str = "core";

const BUILTINS: &[(&str, &str)] = &[
    ("exit", "Exit the shell."),
    ("help", "Show available commands."),
];

/// An option or subcommand word accepted as the first argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub flag: String,
    /// Space-separated names of the values the option takes, e.g. `<lat> <lon>`
    pub arguments: String,
    pub description: String,
}

impl CommandOption {
    pub fn new(
        flag: impl Into<String>,
        arguments: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            flag: flag.into(),
            arguments: arguments.into(),
            description: description.into(),
        }
    }

    /// Number of values that must follow the flag.
    pub fn arity(&self) -> usize {
        self.arguments.split_whitespace().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub category: String,
    pub description: String,
    pub usage: String,
    pub min_args: usize,
    pub options: Vec<CommandOption>,
}

impl CommandInfo {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            category: category.into(),
            description: String::new(),
            min_args: 0,
            options: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn min_args(mut self, min_args: usize) -> Self {
        self.min_args = min_args;
        self
    }

    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }
}

/// A command the shell can run.
///
/// `args[0]` is the full command name, even when the user typed a prefix.
pub trait Command<O, I> {
    fn info(&self) -> &CommandInfo;
    fn run(&mut self, args: &[String], printer: &mut MessagePrinter<O, I>);
}

/// Adapter turning a closure into a [`Command`].
pub struct FnCommand<F> {
    info: CommandInfo,
    handler: F,
}

impl<F> FnCommand<F> {
    pub fn new(info: CommandInfo, handler: F) -> Self {
        Self { info, handler }
    }
}

impl<O, I, F> Command<O, I> for FnCommand<F>
where
    F: FnMut(&[String], &mut MessagePrinter<O, I>),
{
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    fn run(&mut self, args: &[String], printer: &mut MessagePrinter<O, I>) {
        (self.handler)(args, printer)
    }
}

/// How a typed word maps to registered commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    Ambiguous(Vec<String>),
    Unknown,
}

/// Result of executing one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The named command ran
    Executed(String),
    /// The named command was found but its arguments did not fit
    BadArguments(String),
    /// Several commands share the typed prefix
    Ambiguous(Vec<String>),
    Unknown(String),
    /// Nothing to run
    Empty,
    Exit,
}

pub struct Shell<O = io::Stdout, I = io::StdinLock<'static>> {
    printer: MessagePrinter<O, I>,
    prompt: String,
    intro: Option<String>,
    commands: BTreeMap<String, Box<dyn Command<O, I>>>,
}

impl<O: Write, I: BufRead> Shell<O, I> {
    pub fn new(printer: MessagePrinter<O, I>) -> Self {
        Self {
            printer,
            prompt: "%red$ %end".to_string(),
            intro: None,
            commands: BTreeMap::new(),
        }
    }

    /// Prompt markup shown before every line.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Markup printed once when the loop starts.
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }

    pub fn printer(&self) -> &MessagePrinter<O, I> {
        &self.printer
    }

    pub fn printer_mut(&mut self) -> &mut MessagePrinter<O, I> {
        &mut self.printer
    }

    /// Register a command, replacing any command with the same name.
    ///
    /// Built-in names (`help`, `exit`) always run the built-in.
    pub fn add_command(&mut self, command: Box<dyn Command<O, I>>) {
        let name = command.info().name.clone();
        if self.commands.insert(name.clone(), command).is_some() {
            debug!("Replaced command {}", name);
        }
    }

    pub fn remove_command(&mut self, name: &str) -> bool {
        self.commands.remove(name).is_some()
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Resolve a typed word to a registered command name.
    pub fn resolve(&self, word: &str) -> Resolution {
        if self.commands.contains_key(word) {
            return Resolution::Found(word.to_string());
        }

        let candidates: Vec<String> = self
            .commands
            .keys()
            .filter(|name| name.starts_with(word))
            .cloned()
            .collect();

        match candidates.len() {
            0 => Resolution::Unknown,
            1 => Resolution::Found(candidates.into_iter().next().unwrap_or_default()),
            _ => Resolution::Ambiguous(candidates),
        }
    }

    /// Run the prompt loop until `exit` or the end of input.
    pub fn run_loop(&mut self) {
        if let Some(intro) = self.intro.clone() {
            self.printer
                .print_with(MessageKind::Empty, &intro, &PrintOptions::untranslated());
        }

        let prompt = self.prompt.clone();
        while let Some(line) = self.printer.read_line(&prompt) {
            let args = match split_args(&line) {
                Ok(args) => args,
                Err(e) => {
                    self.printer.print_error(&format!("Invalid input: {}", e));
                    continue;
                }
            };

            if self.execute(&args) == Outcome::Exit {
                break;
            }
        }
    }

    /// Execute one already split command line.
    pub fn execute(&mut self, args: &[String]) -> Outcome {
        let Some(word) = args.first() else {
            return Outcome::Empty;
        };

        match word.as_str() {
            "exit" => return Outcome::Exit,
            "help" => {
                self.print_help();
                return Outcome::Executed("help".to_string());
            }
            _ => {}
        }

        match self.resolve(word) {
            Resolution::Found(name) => {
                let mut fixed = args.to_vec();
                fixed[0] = name.clone();

                let Some(command) = self.commands.get_mut(&name) else {
                    return Outcome::Unknown(word.clone());
                };

                if !verify_args(&fixed, command.info()) {
                    let info = command.info().clone();
                    self.print_usage(&info);
                    return Outcome::BadArguments(name);
                }

                command.run(&fixed, &mut self.printer);
                Outcome::Executed(name)
            }
            Resolution::Ambiguous(candidates) => {
                self.printer
                    .print_warning(&format!("Did you mean? {}", candidates.join(", ")));
                self.print_unrecognized(word);
                Outcome::Ambiguous(candidates)
            }
            Resolution::Unknown => {
                self.print_unrecognized(word);
                Outcome::Unknown(word.clone())
            }
        }
    }

    fn print_unrecognized(&mut self, word: &str) {
        self.printer
            .print_error(&format!("Unrecognized command: {}", word));
    }

    fn print_usage(&mut self, info: &CommandInfo) {
        self.printer.print_usage(&info.usage);
        if info.options.is_empty() {
            return;
        }

        let rows: Vec<Vec<&str>> = info
            .options
            .iter()
            .map(|option| {
                vec![
                    option.flag.as_str(),
                    option.arguments.as_str(),
                    option.description.as_str(),
                ]
            })
            .collect();
        if let Err(e) = self.printer.print_table(
            "Options",
            &["Option", "Arguments", "Description"],
            &rows,
        ) {
            debug!("Options table for {} not printed: {}", info.name, e);
        }
    }

    fn print_help(&mut self) {
        let mut categories: BTreeMap<String, Vec<Vec<String>>> = BTreeMap::new();

        for (name, description) in BUILTINS {
            categories
                .entry(CORE_CATEGORY.to_string())
                .or_default()
                .push(vec![name.to_string(), description.to_string()]);
        }
        for command in self.commands.values() {
            let info = command.info();
            categories
                .entry(info.category.clone())
                .or_default()
                .push(vec![info.name.clone(), info.description.clone()]);
        }

        for (category, rows) in categories {
            let title = format!("{} Commands", category);
            if let Err(e) = self
                .printer
                .print_table(&title, &["Command", "Description"], &rows)
            {
                debug!("Help table for {} not printed: {}", category, e);
            }
        }
    }
}

/// Check `args` (command name first) against a command's declared needs.
pub fn verify_args(args: &[String], info: &CommandInfo) -> bool {
    let given = args.len().saturating_sub(1);
    if given < info.min_args {
        return false;
    }

    if info.options.is_empty() || given == 0 {
        return true;
    }

    match info.options.iter().find(|option| option.flag == args[1]) {
        Some(option) => given - 1 >= option.arity(),
        None => false,
    }
}

/// Split a command line into words.
///
/// Whitespace separates words; single and double quotes group them; a
/// backslash escapes the next character outside single quotes.
pub fn split_args(line: &str) -> Result<Vec<String>, ShellError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), c) => current.push(c),
            (Some('"'), '"') => quote = None,
            (_, '\\') => {
                let escaped = chars.next().ok_or(ShellError::TrailingEscape)?;
                current.push(escaped);
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(ShellError::UnclosedQuote(q));
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrinterConfig;
    use crate::markup::strip_ansi;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    type TestShell = Shell<Vec<u8>, Cursor<Vec<u8>>>;

    fn shell(input: &str) -> TestShell {
        let printer = MessagePrinter::with_io(
            PrinterConfig::new(),
            Vec::new(),
            Cursor::new(input.as_bytes().to_vec()),
        );
        Shell::new(printer)
    }

    fn stdout_of(shell: &TestShell) -> String {
        strip_ansi(&String::from_utf8_lossy(shell.printer().output()))
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Registers a command that records the arguments it was run with.
    fn recorder(shell: &mut TestShell, info: CommandInfo) -> Rc<RefCell<Vec<Vec<String>>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        shell.add_command(Box::new(FnCommand::new(
            info,
            move |args: &[String], _printer: &mut MessagePrinter<Vec<u8>, Cursor<Vec<u8>>>| {
                sink.borrow_mut().push(args.to_vec());
            },
        )));
        calls
    }

    // ==================== split_args Tests ====================

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            split_args("  say   info hello ").unwrap(),
            args(&["say", "info", "hello"])
        );
        assert!(split_args("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_quotes_and_escapes() {
        assert_eq!(
            split_args(r#"say "hello world" 'it''s' a\ b"#).unwrap(),
            args(&["say", "hello world", "its", "a b"])
        );
        assert_eq!(split_args(r#"x "a\"b""#).unwrap(), args(&["x", "a\"b"]));
        assert_eq!(split_args("x ''").unwrap(), args(&["x", ""]));
    }

    #[test]
    fn test_split_errors() {
        assert_eq!(split_args("say 'oops"), Err(ShellError::UnclosedQuote('\'')));
        assert_eq!(split_args("say oops\\"), Err(ShellError::TrailingEscape));
    }

    // ==================== verify_args Tests ====================

    #[test]
    fn test_verify_min_args() {
        let info = CommandInfo::new("plot", "map").min_args(2);
        assert!(!verify_args(&args(&["plot", "1"]), &info));
        assert!(verify_args(&args(&["plot", "1", "2"]), &info));
    }

    #[test]
    fn test_verify_options() {
        let info = CommandInfo::new("log", "io")
            .option(CommandOption::new("-o", "<file>", "Write to file."))
            .option(CommandOption::new("-c", "", "Clear."));

        assert!(verify_args(&args(&["log"]), &info));
        assert!(verify_args(&args(&["log", "-c"]), &info));
        assert!(verify_args(&args(&["log", "-o", "out.txt"]), &info));
        assert!(!verify_args(&args(&["log", "-o"]), &info));
        assert!(!verify_args(&args(&["log", "-x"]), &info));
    }

    // ==================== resolve Tests ====================

    #[test]
    fn test_resolve_prefixes() {
        let mut shell = shell("");
        recorder(&mut shell, CommandInfo::new("plot", "map"));
        recorder(&mut shell, CommandInfo::new("print", "io"));
        recorder(&mut shell, CommandInfo::new("say", "io"));

        assert_eq!(shell.resolve("plot"), Resolution::Found("plot".to_string()));
        assert_eq!(shell.resolve("s"), Resolution::Found("say".to_string()));
        assert_eq!(shell.resolve("pl"), Resolution::Found("plot".to_string()));
        assert_eq!(
            shell.resolve("p"),
            Resolution::Ambiguous(vec!["plot".to_string(), "print".to_string()])
        );
        assert_eq!(shell.resolve("zap"), Resolution::Unknown);
    }

    #[test]
    fn test_exact_name_wins_over_longer_names() {
        let mut shell = shell("");
        recorder(&mut shell, CommandInfo::new("map", "map"));
        recorder(&mut shell, CommandInfo::new("maps", "map"));

        assert_eq!(shell.resolve("map"), Resolution::Found("map".to_string()));
    }

    // ==================== execute Tests ====================

    #[test]
    fn test_execute_runs_with_full_name() {
        let mut shell = shell("");
        let calls = recorder(&mut shell, CommandInfo::new("say", "io").min_args(1));

        let outcome = shell.execute(&args(&["sa", "hello"]));

        assert_eq!(outcome, Outcome::Executed("say".to_string()));
        assert_eq!(*calls.borrow(), vec![args(&["say", "hello"])]);
    }

    #[test]
    fn test_execute_bad_arguments_prints_usage() {
        let mut shell = shell("");
        let calls = recorder(
            &mut shell,
            CommandInfo::new("log", "io")
                .usage("log <option>")
                .min_args(1)
                .option(CommandOption::new("-o", "<file>", "Write to file.")),
        );

        let outcome = shell.execute(&args(&["log"]));

        assert_eq!(outcome, Outcome::BadArguments("log".to_string()));
        assert!(calls.borrow().is_empty());
        let stdout = stdout_of(&shell);
        assert!(stdout.starts_with("Usage: log <option>\n"));
        assert!(stdout.contains("Options:"));
        assert!(stdout.contains("    -o        <file>       Write to file."));
    }

    #[test]
    fn test_execute_ambiguous_and_unknown() {
        let mut shell = shell("");
        recorder(&mut shell, CommandInfo::new("plot", "map"));
        recorder(&mut shell, CommandInfo::new("print", "io"));

        let outcome = shell.execute(&args(&["p"]));
        assert_eq!(
            outcome,
            Outcome::Ambiguous(vec!["plot".to_string(), "print".to_string()])
        );
        assert_eq!(
            shell.execute(&args(&["nope"])),
            Outcome::Unknown("nope".to_string())
        );

        let stdout = stdout_of(&shell);
        assert!(stdout.contains("[!] Did you mean? plot, print\n"));
        assert!(stdout.contains("[-] Unrecognized command: p\n"));
        assert!(stdout.contains("[-] Unrecognized command: nope\n"));
    }

    #[test]
    fn test_help_lists_categories() {
        let mut shell = shell("");
        recorder(
            &mut shell,
            CommandInfo::new("plot", "map").description("Plot a point."),
        );

        assert_eq!(
            shell.execute(&args(&["help"])),
            Outcome::Executed("help".to_string())
        );

        let stdout = stdout_of(&shell);
        assert!(stdout.contains("core Commands:"));
        assert!(stdout.contains("    help       Show available commands."));
        assert!(stdout.contains("map Commands:"));
        assert!(stdout.contains("    plot       Plot a point."));
    }

    #[test]
    fn test_builtins_cannot_be_shadowed() {
        let mut shell = shell("");
        let calls = recorder(&mut shell, CommandInfo::new("exit", "custom"));

        assert_eq!(shell.execute(&args(&["exit"])), Outcome::Exit);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_remove_command() {
        let mut shell = shell("");
        recorder(&mut shell, CommandInfo::new("plot", "map"));

        assert!(shell.remove_command("plot"));
        assert!(!shell.remove_command("plot"));
        assert!(shell.command_names().is_empty());
    }

    // ==================== run_loop Tests ====================

    #[test]
    fn test_run_loop_until_end_of_input() {
        let mut shell = shell("say one\n\nsay 'two words'\n");
        let calls = recorder(&mut shell, CommandInfo::new("say", "io"));

        shell.run_loop();

        assert_eq!(
            *calls.borrow(),
            vec![args(&["say", "one"]), args(&["say", "two words"])]
        );
    }

    #[test]
    fn test_run_loop_stops_at_exit() {
        let mut shell = shell("say one\nexit\nsay two\n").with_intro("Welcome%newline");
        let calls = recorder(&mut shell, CommandInfo::new("say", "io"));

        shell.run_loop();

        assert_eq!(calls.borrow().len(), 1);
        assert!(stdout_of(&shell).starts_with("Welcome\n\n$ "));
    }

    #[test]
    fn test_run_loop_continues_after_invalid_utf8() {
        let printer = MessagePrinter::with_io(
            PrinterConfig::new(),
            Vec::new(),
            Cursor::new(b"\xff\xfe\nsay hi\n".to_vec()),
        );
        let mut shell = Shell::new(printer);
        let calls = recorder(&mut shell, CommandInfo::new("say", "io"));

        shell.run_loop();

        assert_eq!(*calls.borrow(), vec![args(&["say", "hi"])]);
        assert!(stdout_of(&shell).contains("[-] Unrecognized command: \u{FFFD}\u{FFFD}\n"));
    }

    #[test]
    fn test_run_loop_reports_bad_quotes() {
        let mut shell = shell("say 'open\n");
        let calls = recorder(&mut shell, CommandInfo::new("say", "io"));

        shell.run_loop();

        assert!(calls.borrow().is_empty());
        assert!(stdout_of(&shell).contains("[-] Invalid input: unclosed ' quote"));
    }
}
