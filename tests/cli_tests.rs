mod common;

use std::path::PathBuf;

use clap::Parser;
use common::baseline_person;
use common::fake_app::FakeRegistrationApp;
use form_check::catalog::field_kind::FieldKind;
use form_check::catalog::generator::generate;
use form_check::catalog::test_case::TestCase;
use form_check::cli::commands::{
    FailureArtifacts, catalog_entries, format_case_line, run_cases, sanitize_filename, select_cases,
};
use form_check::cli::config::{Cli, Commands, ConfigError, Settings, load_settings, resolve_settings};
use form_check::form::field::FormField;
use form_check::pages::web_tables_page::WebTablesPage;
use form_check::protocol::error::ValidationError;
use form_check::trace::logger::TraceLogger;
use form_check::trace::subscriber::level_for_verbosity;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("form-check-{}-{}", std::process::id(), name))
}

// =========================================================================
// Argument parsing
// =========================================================================

#[test]
fn parses_cases_command() {
    let cli = Cli::try_parse_from(["form-check", "cases", "--field", "person-name", "--seed", "9"]).unwrap();
    match cli.command {
        Commands::Cases { field, seed, format } => {
            assert_eq!(field, FieldKind::PersonName);
            assert_eq!(seed, Some(9));
            assert_eq!(format, "yaml");
        }
        other => panic!("Expected Cases, got {:?}", other),
    }
}

#[test]
fn parses_validate_command_with_global_flags() {
    let cli = Cli::try_parse_from([
        "form-check",
        "validate",
        "--field",
        "age",
        "--case",
        "99",
        "-vv",
        "--headed",
        "--browser",
        "firefox",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    assert!(cli.headed);
    assert_eq!(cli.browser.as_deref(), Some("firefox"));
    match cli.command {
        Commands::Validate { field, case, .. } => {
            assert_eq!(field, FormField::Age);
            assert_eq!(case.as_deref(), Some("99"));
        }
        other => panic!("Expected Validate, got {:?}", other),
    }
}

#[test]
fn unknown_field_is_rejected_by_parser() {
    assert!(Cli::try_parse_from(["form-check", "validate", "--field", "phone"]).is_err());
    assert!(Cli::try_parse_from(["form-check", "cases", "--field", "zip"]).is_err());
}

#[test]
fn person_count_defaults_to_one() {
    let cli = Cli::try_parse_from(["form-check", "person"]).unwrap();
    assert!(matches!(cli.command, Commands::Person { seed: None, count: 1 }));
}

#[test]
fn verbosity_levels() {
    assert_eq!(level_for_verbosity(0), "warn");
    assert_eq!(level_for_verbosity(1), "info");
    assert_eq!(level_for_verbosity(2), "debug");
    assert_eq!(level_for_verbosity(7), "trace");
}

// =========================================================================
// Settings
// =========================================================================

#[test]
fn missing_default_config_yields_defaults() {
    // No form-check.yaml at the crate root
    let settings = load_settings(None).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.browser_name, "chromium");
    assert!(settings.headless);
    assert_eq!(settings.expect_timeout_ms, 5000);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let err = load_settings(Some("/nonexistent/form-check.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn partial_yaml_keeps_other_defaults() {
    let path = temp_path("partial.yaml");
    std::fs::write(&path, "app_url: http://localhost:8080\nwindow_size:\n  width: 800\n  height: 600\n").unwrap();

    let settings = load_settings(path.to_str()).unwrap();
    assert_eq!(settings.app_url, "http://localhost:8080");
    assert_eq!(settings.window_size.width, 800);
    assert_eq!(settings.browser_name, "chromium");
    assert_eq!(settings.locale, "ru-RU");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn invalid_browser_in_yaml_is_rejected() {
    let path = temp_path("bad-browser.yaml");
    std::fs::write(&path, "browser_name: netscape\n").unwrap();

    let cli = Cli::try_parse_from(["form-check", "--config", path.to_str().unwrap(), "person"]).unwrap();
    let err = resolve_settings(&cli).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBrowser(ref name) if name == "netscape"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn browser_flag_overrides_invalid_yaml_value() {
    let path = temp_path("overridden-browser.yaml");
    std::fs::write(&path, "browser_name: netscape\n").unwrap();

    // Loading alone does not judge the file; the merged result is validated
    assert!(load_settings(path.to_str()).is_ok());

    let cli = Cli::try_parse_from([
        "form-check",
        "--config",
        path.to_str().unwrap(),
        "--browser",
        "chromium",
        "person",
    ])
    .unwrap();
    let settings = resolve_settings(&cli).unwrap();
    assert_eq!(settings.browser_name, "chromium");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn browser_flag_is_validated_too() {
    let cli = Cli::try_parse_from(["form-check", "--browser", "netscape", "person"]).unwrap();
    let err = resolve_settings(&cli).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBrowser(ref name) if name == "netscape"));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let path = temp_path("malformed.yaml");
    std::fs::write(&path, "headless: [not, a, bool\n").unwrap();

    let err = load_settings(path.to_str()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn remote_browser_needs_endpoint() {
    let mut settings = Settings {
        browser_name: "remote_browser".into(),
        ..Settings::default()
    };
    assert!(matches!(settings.validate(), Err(ConfigError::MissingRemoteEndpoint)));

    settings.remote_browser = Some("ws://grid:3000".into());
    assert!(settings.validate().is_ok());
    assert_eq!(settings.launch_options().remote_endpoint.as_deref(), Some("ws://grid:3000"));
}

#[test]
fn cli_flags_override_settings() {
    let cli = Cli::try_parse_from([
        "form-check",
        "validate",
        "--field",
        "email",
        "--app-url",
        "http://127.0.0.1:9000",
        "--headed",
    ])
    .unwrap();

    let settings = Settings::default().with_overrides(&cli);
    assert_eq!(settings.app_url, "http://127.0.0.1:9000");
    assert!(!settings.headless);
    assert_eq!(settings.browser_name, "chromium");

    let opts = settings.launch_options();
    assert!(!opts.headless);
    assert_eq!((opts.width, opts.height), (1920, 1080));
    assert_eq!(opts.videos_dir.as_deref(), Some("videos"));
    assert_eq!(opts.tracing_dir.as_deref(), Some("tracing"));
}

// =========================================================================
// Commands
// =========================================================================

#[test]
fn sanitize_filename_replaces_unsafe_characters() {
    assert_eq!(sanitize_filename("valid_age"), "valid_age");
    assert_eq!(sanitize_filename("-1"), "-1");
    assert_eq!(sanitize_filename("Space First/2"), "space_first_2");
}

#[test]
fn catalog_entries_carry_fingerprints() {
    let entries = catalog_entries(FieldKind::Email, Some(21));
    let cases = generate(FieldKind::Email, Some(21));
    assert_eq!(entries.len(), cases.len());
    for (entry, case) in entries.iter().zip(&cases) {
        assert_eq!(entry.name, case.name);
        assert_eq!(entry.id, case.fingerprint(FieldKind::Email));
    }
}

#[test]
fn select_cases_whole_catalog_or_one() {
    let all = select_cases(FormField::Department, None, Some(4)).unwrap();
    assert_eq!(all, generate(FieldKind::Department, Some(4)));

    let one = select_cases(FormField::Age, Some("99"), None).unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].name, "99");
}

#[test]
fn select_cases_unknown_name() {
    let err = select_cases(FormField::Salary, Some("cyrillic"), None).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownTestCase(_)));
}

#[test]
fn run_cases_opens_a_fresh_form_per_case() {
    let mut app = FakeRegistrationApp::new();
    let page = WebTablesPage::new("https://demoqa.com");
    let cases = vec![
        TestCase::rejected("99", 99_i64),
        TestCase::accepted("valid_age", 44_i64),
        TestCase::rejected("too_young", 3_i64),
    ];

    let runs = run_cases(
        &mut app,
        &page,
        &baseline_person(),
        FormField::Age,
        cases,
        &TraceLogger::disabled(),
        FailureArtifacts::default(),
    );

    assert_eq!(runs.len(), 3);
    assert!(runs.iter().all(|r| r.passed()));
    assert_eq!(app.submits, 3);
    assert!(app.screenshots.is_empty());
    assert_eq!(app.trace_chunks_started, 0, "no tracing directory, no chunks");
    assert!(format_case_line(&runs[0]).contains("PASS"));
}

#[test]
fn failing_case_is_screenshotted_and_run_continues() {
    let mut app = FakeRegistrationApp::new();
    let page = WebTablesPage::new("https://demoqa.com");
    let dir = temp_path("screens");
    let cases = vec![
        // The form accepts 50, so expecting rejection fails
        TestCase::rejected("wrong expectation", 50_i64),
        TestCase::accepted("valid_age", 50_i64),
    ];

    let runs = run_cases(
        &mut app,
        &page,
        &baseline_person(),
        FormField::Age,
        cases,
        &TraceLogger::disabled(),
        FailureArtifacts {
            screenshots_dir: dir.to_str(),
            tracing_dir: None,
        },
    );

    assert!(!runs[0].passed());
    assert!(runs[1].passed());
    assert_eq!(app.screenshots.len(), 1);
    assert!(app.screenshots[0].ends_with("age_wrong_expectation.png"));
    assert!(dir.is_dir());
    assert!(app.trace_chunks_stopped.is_empty());

    let line = format_case_line(&runs[0]);
    assert!(line.contains("FAIL"));
    assert!(line.contains("visibility mismatch"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn trace_is_kept_for_failing_cases_only() {
    let mut app = FakeRegistrationApp::new();
    let page = WebTablesPage::new("https://demoqa.com");
    let dir = temp_path("traces");
    let cases = vec![
        TestCase::accepted("valid_age", 30_i64),
        TestCase::rejected("wrong expectation", 30_i64),
    ];

    let runs = run_cases(
        &mut app,
        &page,
        &baseline_person(),
        FormField::Age,
        cases,
        &TraceLogger::disabled(),
        FailureArtifacts {
            screenshots_dir: None,
            tracing_dir: dir.to_str(),
        },
    );

    assert!(runs[0].passed());
    assert!(!runs[1].passed());
    assert_eq!(app.trace_chunks_started, 2);
    assert_eq!(app.trace_chunks_stopped.len(), 2);
    assert_eq!(app.trace_chunks_stopped[0], None, "passing case trace is discarded");
    let saved = app.trace_chunks_stopped[1].as_deref().expect("failing case trace is saved");
    assert!(saved.ends_with("age_wrong_expectation.zip"));
    assert!(dir.is_dir());
    assert!(app.screenshots.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}
