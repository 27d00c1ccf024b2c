//! Integration tests for the badges printer
//!
//! These tests drive the public API end to end: printing through the
//! translator into a captured output and a real log file, reading answers
//! from scripted input, and running the command shell.

use badges::{
    markup::strip_ansi, CommandInfo, FnCommand, Language, MessageKind, MessagePrinter, Point,
    PrintOptions, PrinterConfig, Shell,
};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

type TestPrinter = MessagePrinter<Vec<u8>, Cursor<Vec<u8>>>;

// ==================== Test Helpers ====================

fn create_printer(config: PrinterConfig, input: &str) -> TestPrinter {
    MessagePrinter::with_io(config, Vec::new(), Cursor::new(input.as_bytes().to_vec()))
}

fn stdout_of(printer: &TestPrinter) -> String {
    strip_ansi(&String::from_utf8_lossy(printer.output()))
}

fn read_log(path: &Path) -> String {
    std::fs::read_to_string(path).expect("Failed to read log")
}

// ==================== Logging Tests ====================

#[test]
fn test_session_is_mirrored_to_log() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("session.log");

    let mut printer = create_printer(PrinterConfig::new().with_log_file(&log_path), "yes\n");
    printer.print_process("Connecting");
    printer.print_success("Connected");
    let answer = printer.ask("Proceed? ");
    printer.print_warning("Low disk space");
    printer.print_error("Transfer failed");
    printer.print_information("Retrying later");
    drop(printer);

    assert_eq!(answer.as_deref(), Some("yes"));
    assert_eq!(
        read_log(&log_path),
        "[~] Connecting\n[*] Connected\n[?] Proceed? yes\n[!] Low disk space\n[-] Transfer failed\n[i] Retrying later\n"
    );
}

#[test]
fn test_log_is_appended_across_printers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("session.log");

    for text in ["first", "second"] {
        let mut printer = create_printer(PrinterConfig::new().with_log_file(&log_path), "");
        printer.print_success(text);
    }

    assert_eq!(read_log(&log_path), "[*] first\n[*] second\n");
}

#[test]
fn test_disabled_logging_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("session.log");
    let config = PrinterConfig::new()
        .with_log_file(&log_path)
        .with_logging(false);

    let mut printer = create_printer(config, "n\n");
    printer.print_success("Hello, world!");
    printer.ask("Continue? ");

    assert!(!log_path.exists());
    assert_eq!(stdout_of(&printer), "[*] Hello, world!\n[?] Continue? ");
}

#[test]
fn test_unwritable_log_does_not_stop_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("missing-dir").join("session.log");

    let mut printer = create_printer(PrinterConfig::new().with_log_file(&log_path), "");
    printer.print_error("still shown");

    assert_eq!(stdout_of(&printer), "[-] still shown\n");
    assert!(!printer.log().is_active());
}

// ==================== Translation Tests ====================

#[test]
fn test_dictionary_translation_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dict_path = temp_dir.path().join("ru.dict");
    let log_path = temp_dir.path().join("session.log");
    std::fs::write(
        &dict_path,
        "# Russian phrases\nHello, world! => Привет, мир!\nDone => Готово\n",
    )
    .expect("Failed to write dictionary");

    let config = PrinterConfig::new()
        .with_language(Language::parse("RU"))
        .with_dictionary(&dict_path)
        .with_log_file(&log_path);
    let mut printer = create_printer(config, "");
    printer.print_success("Hello, world!");
    printer.print_success("Hello, world!");
    printer.print_process("Done");
    printer.print_process("Not in the dictionary");

    let metrics = printer.translator().metrics().report();
    drop(printer);

    assert_eq!(
        read_log(&log_path),
        "[*] Привет, мир!\n[*] Привет, мир!\n[~] Готово\n[~] Not in the dictionary\n"
    );
    assert_eq!(metrics.cache_hits, 1);
    assert_eq!(metrics.cache_misses, 3);
    assert_eq!(metrics.dictionary_hits, 2);
}

#[test]
fn test_missing_dictionary_falls_back_to_original() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = PrinterConfig::new()
        .with_language(Language::parse("de"))
        .with_dictionary(temp_dir.path().join("absent.dict"));

    let mut printer = create_printer(config, "");
    printer.print_information("Hello");

    assert_eq!(stdout_of(&printer), "[i] Hello\n");
}

#[test]
fn test_table_title_is_translated_but_cells_are_not() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dict_path = temp_dir.path().join("ru.dict");
    std::fs::write(&dict_path, "Hosts => Узлы\nlocalhost => местный\n")
        .expect("Failed to write dictionary");

    let config = PrinterConfig::new()
        .with_language(Language::parse("ru"))
        .with_dictionary(&dict_path);
    let mut printer = create_printer(config, "");
    printer
        .print_table("Hosts", &["Host"], &[vec!["localhost"]])
        .expect("Should print table");

    let stdout = stdout_of(&printer);
    assert!(stdout.contains("Узлы:"));
    assert!(stdout.contains("localhost"));
    assert!(!stdout.contains("местный"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_translation_is_persisted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "translatedText": "Bonjour" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dict_path = temp_dir.path().join("fr.dict");
    let log_path = temp_dir.path().join("session.log");
    let config = PrinterConfig::new()
        .with_language(Language::parse("fr"))
        .with_dictionary(&dict_path)
        .with_persist_translations(true)
        .with_translate_url(format!("{}/translate", mock_server.uri()))
        .with_log_file(&log_path);

    tokio::task::spawn_blocking(move || {
        let mut printer = create_printer(config, "");
        printer.print_success("Hello");
        printer.print_success("Hello");
    })
    .await
    .expect("Blocking task panicked");

    assert_eq!(read_log(&log_path), "[*] Bonjour\n[*] Bonjour\n");
    assert_eq!(
        std::fs::read_to_string(&dict_path).expect("dictionary written"),
        "Hello => Bonjour\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_failure_falls_back_to_original() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let dict_path = temp_dir.path().join("fr.dict");
    let config = PrinterConfig::new()
        .with_language(Language::parse("fr"))
        .with_dictionary(&dict_path)
        .with_persist_translations(true)
        .with_translate_url(format!("{}/translate", mock_server.uri()));

    let (stdout, failures) = tokio::task::spawn_blocking(move || {
        let mut printer = create_printer(config, "");
        printer.print_warning("Hello");
        (
            stdout_of(&printer),
            printer.translator().metrics().remote_failures(),
        )
    })
    .await
    .expect("Blocking task panicked");

    assert_eq!(stdout, "[!] Hello\n");
    assert_eq!(failures, 1);
    assert!(!dict_path.exists());
}

// ==================== Map Tests ====================

#[test]
fn test_map_points_are_logged() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("session.log");

    let mut printer = create_printer(PrinterConfig::new().with_log_file(&log_path), "");
    printer
        .print_map(&[
            Point::new(51.5, -0.12).with_marker('L'),
            Point::new(-33.87, 151.21).with_marker('S'),
        ])
        .expect("Should print map");
    drop(printer);

    let log = read_log(&log_path);
    assert_eq!(log.lines().count(), 21);
    assert_eq!(log.matches('L').count(), 1);
    assert_eq!(log.matches('S').count(), 1);
}

// ==================== Shell Tests ====================

#[test]
fn test_shell_session() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("session.log");
    let printer = create_printer(
        PrinterConfig::new().with_log_file(&log_path),
        "greet World\ngr\nhelp\nfly\nexit\ngreet Nobody\n",
    );

    let mut shell = Shell::new(printer).with_prompt("$ ");
    shell.add_command(Box::new(FnCommand::new(
        CommandInfo::new("greet", "demo")
            .description("Greet someone.")
            .usage("greet <name>")
            .min_args(1),
        |args: &[String], printer: &mut TestPrinter| {
            printer.print_with(
                MessageKind::Success,
                &format!("Hello, {}!", args[1]),
                &PrintOptions::untranslated(),
            );
        },
    )));
    shell.run_loop();

    let stdout = strip_ansi(&String::from_utf8_lossy(shell.printer().output()));
    assert!(stdout.contains("$ [*] Hello, World!\n"));
    assert!(stdout.contains("Usage: greet <name>\n"));
    assert!(stdout.contains("demo Commands:"));
    assert!(stdout.contains("    greet      Greet someone."));
    assert!(stdout.contains("[-] Unrecognized command: fly\n"));
    assert!(!stdout.contains("Nobody"));
    drop(shell);

    let log = read_log(&log_path);
    assert!(log.starts_with("$ greet World\n[*] Hello, World!\n$ gr\nUsage: greet <name>\n"));
    assert!(log.ends_with("$ exit\n"));
}
