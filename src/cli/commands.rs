use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::browser::driver::BrowserDriver;
use crate::browser::error::DriverError;
use crate::browser::session::BrowserSession;
use crate::catalog::field_kind::FieldKind;
use crate::catalog::generator::{find_case, generate};
use crate::catalog::test_case::{CaseValue, Outcome, TestCase};
use crate::cli::config::Settings;
use crate::data::person::PersonInfo;
use crate::form::field::FormField;
use crate::pages::web_tables_page::WebTablesPage;
use crate::protocol::error::ValidationError;
use crate::protocol::report::ValidationReport;
use crate::protocol::validator::validate_field_traced;
use crate::trace::logger::TraceLogger;

// ============================================================================
// cases subcommand
// ============================================================================

/// One catalog row as printed by `cases`.
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub value: CaseValue,
    pub expected: Outcome,
}

pub fn catalog_entries(kind: FieldKind, seed: Option<u64>) -> Vec<CatalogEntry> {
    generate(kind, seed)
        .into_iter()
        .map(|case| CatalogEntry {
            id: case.fingerprint(kind),
            name: case.name,
            value: case.value,
            expected: case.expected,
        })
        .collect()
}

pub fn cmd_cases(kind: FieldKind, seed: Option<u64>, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entries = catalog_entries(kind, seed);
    let out = match format {
        "json" => serde_json::to_string_pretty(&entries)?,
        _ => serde_yaml::to_string(&entries)?,
    };
    println!("{}", out);
    Ok(())
}

// ============================================================================
// person subcommand
// ============================================================================

pub fn cmd_person(seed: Option<u64>, count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let persons = PersonInfo::generate_many(count, seed);
    println!("{}", serde_json::to_string_pretty(&persons)?);
    Ok(())
}

// ============================================================================
// validate subcommand
// ============================================================================

/// Outcome of one case in a `validate` run.
pub struct CaseRun {
    pub case: TestCase,
    pub result: Result<ValidationReport, ValidationError>,
}

impl CaseRun {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Cases selected for a run: one named case, or the field's whole catalog.
pub fn select_cases(
    field: FormField,
    case_name: Option<&str>,
    seed: Option<u64>,
) -> Result<Vec<TestCase>, ValidationError> {
    let kind = field.kind();
    match case_name {
        Some(name) => Ok(vec![find_case(kind, name, seed)?]),
        None => Ok(generate(kind, seed)),
    }
}

/// Where failure artifacts go. `None` skips that artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureArtifacts<'a> {
    pub screenshots_dir: Option<&'a str>,
    pub tracing_dir: Option<&'a str>,
}

/// Run each case against a freshly opened form. Each case records its own
/// trace chunk. A failing case gets a screenshot and keeps its trace chunk;
/// it does not stop the remaining cases.
pub fn run_cases(
    driver: &mut dyn BrowserDriver,
    page: &WebTablesPage,
    person: &PersonInfo,
    field: FormField,
    cases: Vec<TestCase>,
    tracer: &TraceLogger,
    artifacts: FailureArtifacts<'_>,
) -> Vec<CaseRun> {
    let mut runs = Vec::with_capacity(cases.len());
    for case in cases {
        if artifacts.tracing_dir.is_some() {
            if let Err(e) = driver.start_trace_chunk() {
                warn!("could not start trace chunk for '{}': {}", case.name, e);
            }
        }

        let result = page
            .open_registration_form(driver)
            .map_err(ValidationError::from)
            .and_then(|form| validate_field_traced(driver, form, person, field, &case, tracer));

        let stem = format!("{}_{}", field, sanitize_filename(&case.name));
        if result.is_err() {
            if let Some(dir) = artifacts.screenshots_dir {
                save_artifact(dir, &format!("{}.png", stem), "screenshot", |path| driver.screenshot(path));
            }
        }
        if let Some(dir) = artifacts.tracing_dir {
            if result.is_err() {
                save_artifact(dir, &format!("{}.zip", stem), "trace", |path| {
                    driver.stop_trace_chunk(Some(path))
                });
            } else if let Err(e) = driver.stop_trace_chunk(None) {
                warn!("could not discard trace chunk for '{}': {}", case.name, e);
            }
        }
        runs.push(CaseRun { case, result });
    }
    runs
}

fn save_artifact(
    dir: &str,
    filename: &str,
    what: &str,
    save: impl FnOnce(&str) -> Result<(), DriverError>,
) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!("could not create {} dir '{}': {}", what, dir, e);
        return;
    }
    let path = Path::new(dir).join(filename);
    let path = path.to_string_lossy();
    match save(&path) {
        Ok(()) => info!("Saved failure {}: {}", what, path),
        Err(e) => warn!("could not save {} '{}': {}", what, path, e),
    }
}

/// One console line per case.
pub fn format_case_line(run: &CaseRun) -> String {
    match &run.result {
        Ok(report) => {
            let mut line = format!(
                "\u{2713} PASS  {} [{}] {}",
                report.field, run.case.name, report.observed
            );
            if let Some(rb) = &report.readback {
                line.push_str(&format!("\n    [READBACK] {}", rb));
            }
            line
        }
        Err(e) => format!(
            "\u{2717} FAIL  [{}] expected {}\n    [ERROR] {}",
            run.case.name, run.case.expected, e
        ),
    }
}

/// Validate a field in a live browser and return whether every case passed.
pub fn cmd_validate(
    settings: &Settings,
    field: FormField,
    case_name: Option<&str>,
    seed: Option<u64>,
    person_seed: Option<u64>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let cases = select_cases(field, case_name, seed)?;
    let person = PersonInfo::generate(person_seed);
    info!(seed = person.seed, "baseline person");

    let tracer = match &settings.trace_file {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let page = WebTablesPage::new(&settings.app_url);
    let mut session = BrowserSession::launch(&settings.driver_script, &settings.launch_options())?;

    let runs = run_cases(
        &mut session,
        &page,
        &person,
        field,
        cases,
        &tracer,
        FailureArtifacts {
            screenshots_dir: Some(settings.screenshots_dir.as_str()),
            tracing_dir: Some(settings.tracing_dir.as_str()),
        },
    );
    session.quit()?;

    for run in &runs {
        println!("{}", format_case_line(run));
    }
    let passed = runs.iter().filter(|r| r.passed()).count();
    println!(
        "\n=== {}: {} passed, {} failed ({} total) ===",
        field,
        passed,
        runs.len() - passed,
        runs.len()
    );

    Ok(passed == runs.len())
}

/// Sanitize a case name into a safe filename.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .to_lowercase()
}
