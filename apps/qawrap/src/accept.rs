//! Black-box conformance verifier for wrapper executables.
//!
//! A wrapper is driven through up to three scenarios:
//! - pass fixture (`<fixtures>/pass`, if present): exit 0, success marker,
//!   exactly one non-blank line, valid non-empty JSON details file
//! - fail fixture (`<fixtures>/fail`, if present): exit 1, failure marker,
//!   2 to 5 non-blank lines, valid non-empty JSON details file
//! - no arguments (always, from the wrapper directory): exit 2 and failure
//!   marker
//!
//! Stdout and stderr are judged together. Every check of a scenario is
//! recorded even after an earlier one failed, and a missing or broken details
//! file becomes a labeled failing check rather than an error.

use crate::error::QawrapError;
use crate::models::{AcceptanceReport, AcceptanceResult};
use crate::output::{FAILURE_MARKER, SUCCESS_MARKER};
use crate::process::{self, Completion, ProcessOutcome, ProcessSpec};
use jsonschema::Validator;
use regex::Regex;
use serde_json::Value as Json;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

/// `(details: <absolute path>.json)`. Group 1: the path.
pub static DETAILS_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(details:\s+(/\S+\.json)\)").expect("valid details regex"));

/// Argument handed to the wrapper inside a fixture directory.
pub const FIXTURE_ARG: &str = "src/";

const DETAIL_WIDTH: usize = 100;

/// How the verifier runs a wrapper.
pub trait WrapperInvoker {
    /// Run the wrapper with `args` from `cwd`.
    fn invoke(&self, args: &[String], cwd: &Path) -> ProcessOutcome;

    /// Human-readable rendering of the wrapper command.
    fn describe(&self) -> String;
}

/// Runs the wrapper as a subprocess with a uniform timeout.
pub struct ProcessInvoker {
    pub command: Vec<String>,
    pub timeout: Duration,
}

impl WrapperInvoker for ProcessInvoker {
    fn invoke(&self, args: &[String], cwd: &Path) -> ProcessOutcome {
        let Some((program, base)) = self.command.split_first() else {
            return ProcessOutcome {
                completion: Completion::SpawnFailed("empty wrapper command".into()),
                stdout: String::new(),
                stderr: String::new(),
            };
        };
        let spec = ProcessSpec::new(program.clone(), self.timeout)
            .args(base.iter().cloned())
            .args(args.iter().cloned())
            .cwd(cwd);
        process::run(&spec)
    }

    fn describe(&self) -> String {
        self.command.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    PassFixture,
    FailFixture,
    NoArgs,
}

impl Scenario {
    pub fn name(self) -> &'static str {
        match self {
            Scenario::PassFixture => "Pass Fixture",
            Scenario::FailFixture => "Fail Fixture",
            Scenario::NoArgs => "No Args (Error Case)",
        }
    }

    pub fn expected_exit(self) -> i32 {
        match self {
            Scenario::PassFixture => 0,
            Scenario::FailFixture => 1,
            Scenario::NoArgs => 2,
        }
    }

    fn marker(self) -> (&'static str, &'static str) {
        match self {
            Scenario::PassFixture => ("Output contains success marker", SUCCESS_MARKER),
            Scenario::FailFixture => ("Output contains failure marker", FAILURE_MARKER),
            Scenario::NoArgs => ("Output contains error marker", FAILURE_MARKER),
        }
    }

    /// Allowed non-blank line counts, with the check label.
    fn terseness(self) -> Option<(&'static str, RangeInclusive<usize>)> {
        match self {
            Scenario::PassFixture => Some(("Output is terse (1 line)", 1..=1)),
            Scenario::FailFixture => Some(("Output is terse (2-5 lines)", 2..=5)),
            Scenario::NoArgs => None,
        }
    }
}

/// Extract the details path embedded in wrapper output.
pub fn find_json_path(output: &str) -> Option<String> {
    DETAILS_PATH.captures(output).map(|c| c[1].to_string())
}

pub fn count_nonblank_lines(output: &str) -> usize {
    output.lines().filter(|l| !l.trim().is_empty()).count()
}

/// A sequence or mapping with at least one entry.
pub fn is_non_empty(data: &Json) -> bool {
    match data {
        Json::Array(items) => !items.is_empty(),
        Json::Object(map) => !map.is_empty(),
        _ => false,
    }
}

fn clip(s: &str) -> String {
    s.chars().take(DETAIL_WIDTH).collect()
}

fn record_completion(result: &mut AcceptanceResult, outcome: &ProcessOutcome) {
    let detail = match &outcome.completion {
        Completion::Exited(_) => String::new(),
        Completion::TimedOut => "process did not complete in time".to_string(),
        Completion::NotFound => "wrapper program not found".to_string(),
        Completion::SpawnFailed(msg) => msg.clone(),
    };
    result.check(
        "Process completed",
        matches!(outcome.completion, Completion::Exited(_)),
        detail,
    );
}

fn record_exit_code(result: &mut AcceptanceResult, outcome: &ProcessOutcome, expected: i32) {
    let got = match outcome.exit_code() {
        Some(code) => format!("got {}", code),
        None => "got none".to_string(),
    };
    result.check(
        &format!("Exit code is {}", expected),
        outcome.exit_code() == Some(expected),
        got,
    );
}

/// Checks on the JSON details file referenced by `combined`.
fn record_details(result: &mut AcceptanceResult, combined: &str, validator: &Validator) {
    let json_path = find_json_path(combined);
    result.check("JSON path found in output", json_path.is_some(), "");
    let Some(json_path) = json_path else {
        return;
    };
    if !Path::new(&json_path).exists() {
        result.check("JSON file exists", false, format!("{} not found", json_path));
        return;
    }
    let data = fs::read_to_string(&json_path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str::<Json>(&s).map_err(|e| e.to_string()));
    let data = match data {
        Ok(d) => d,
        Err(e) => {
            result.check("JSON file parses", false, clip(&e));
            return;
        }
    };
    let first_error = validator.iter_errors(&data).next().map(|e| clip(&e.to_string()));
    match first_error {
        None => result.check("JSON validates against schema", true, ""),
        Some(msg) => result.check("JSON validates against schema", false, msg),
    };
    result.check("JSON output is non-empty", is_non_empty(&data), "");
}

/// Run one scenario and record every applicable check.
pub fn run_scenario<I: WrapperInvoker + ?Sized>(
    invoker: &I,
    scenario: Scenario,
    cwd: &Path,
    validator: &Validator,
) -> AcceptanceResult {
    let mut result = AcceptanceResult::new(scenario.name());
    let args: Vec<String> = match scenario {
        Scenario::NoArgs => Vec::new(),
        _ => vec![FIXTURE_ARG.to_string()],
    };
    let outcome = invoker.invoke(&args, cwd);
    let combined = outcome.combined();
    debug!(scenario = scenario.name(), completion = ?outcome.completion, "wrapper finished");

    record_completion(&mut result, &outcome);
    record_exit_code(&mut result, &outcome, scenario.expected_exit());

    let (marker_label, marker) = scenario.marker();
    result.check(
        marker_label,
        combined.contains(marker),
        format!("{:?}", clip(&combined)),
    );

    if let Some((label, range)) = scenario.terseness() {
        let lines = count_nonblank_lines(&combined);
        result.check(label, range.contains(&lines), format!("got {} lines", lines));
    }

    if scenario != Scenario::NoArgs {
        record_details(&mut result, &combined, validator);
    }
    result
}

/// Run every applicable scenario for a wrapper.
pub fn verify<I: WrapperInvoker + ?Sized>(
    invoker: &I,
    wrapper_dir: &Path,
    fixture_dir: &Path,
    validator: &Validator,
) -> Vec<AcceptanceResult> {
    let mut results = Vec::new();
    let pass_dir = fixture_dir.join("pass");
    if pass_dir.exists() {
        results.push(run_scenario(invoker, Scenario::PassFixture, &pass_dir, validator));
    }
    let fail_dir = fixture_dir.join("fail");
    if fail_dir.exists() {
        results.push(run_scenario(invoker, Scenario::FailFixture, &fail_dir, validator));
    }
    results.push(run_scenario(invoker, Scenario::NoArgs, wrapper_dir, validator));
    for r in &results {
        info!(scenario = %r.name, passed = r.passed(), "scenario complete");
    }
    results
}

/// Detect how to run the wrapper from the `llm-*` script in `wrapper_dir`.
pub fn detect_wrapper_command(wrapper_dir: &Path) -> Option<Vec<String>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(wrapper_dir)
        .ok()?
        .flatten()
        .map(|e| e.path())
        .collect();
    entries.sort();
    entries.into_iter().find_map(|path| {
        let name = path.file_name()?.to_string_lossy().to_string();
        if !name.starts_with("llm-") {
            return None;
        }
        let interpreter = match path.extension()?.to_str()? {
            "js" => "node",
            "php" => "php",
            "py" => "python3",
            _ => return None,
        };
        Some(vec![
            interpreter.to_string(),
            path.to_string_lossy().to_string(),
        ])
    })
}

/// Load a schema document and build its validator.
pub fn load_validator(schema_path: &Path) -> Result<Validator, QawrapError> {
    if !schema_path.is_file() {
        return Err(QawrapError::SchemaMissing(schema_path.to_path_buf()));
    }
    let text = fs::read_to_string(schema_path)?;
    let schema: Json = serde_json::from_str(&text).map_err(|e| QawrapError::SchemaInvalid {
        path: schema_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    jsonschema::validator_for(&schema).map_err(|e| QawrapError::SchemaInvalid {
        path: schema_path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct AcceptOptions {
    pub wrapper_dir: PathBuf,
    pub fixture_dir: PathBuf,
    /// Explicit wrapper command, split on whitespace.
    pub wrapper: Option<String>,
    pub schema: Option<PathBuf>,
    pub timeout: Duration,
    /// Directory relative paths are resolved against (default: current dir).
    pub base_dir: Option<PathBuf>,
}

fn absolute_from(base: &Path, p: &Path) -> PathBuf {
    let joined = base.join(p);
    joined.canonicalize().unwrap_or(joined)
}

/// Split an explicit wrapper command and make every token naming an existing
/// path under `base` absolute. Scenarios run from other directories.
pub fn resolve_wrapper_command(cmd: &str, base: &Path) -> Vec<String> {
    cmd.split_whitespace()
        .map(|token| {
            let p = Path::new(token);
            if p.is_relative() && base.join(p).exists() {
                absolute_from(base, p).to_string_lossy().to_string()
            } else {
                token.to_string()
            }
        })
        .collect()
}

/// Resolve the wrapper and schema, then run all scenarios.
pub fn run_acceptance(opts: &AcceptOptions) -> Result<AcceptanceReport, QawrapError> {
    let base = match &opts.base_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let wrapper_dir = absolute_from(&base, &opts.wrapper_dir);
    let fixture_dir = absolute_from(&base, &opts.fixture_dir);

    let command = match &opts.wrapper {
        Some(cmd) => resolve_wrapper_command(cmd, &base),
        None => detect_wrapper_command(&wrapper_dir).unwrap_or_default(),
    };
    if command.is_empty() {
        return Err(QawrapError::WrapperNotFound(wrapper_dir));
    }
    let schema_path = match &opts.schema {
        Some(p) => absolute_from(&base, p),
        None => wrapper_dir.join("schema.json"),
    };
    let validator = load_validator(&schema_path)?;

    let invoker = ProcessInvoker {
        command,
        timeout: opts.timeout,
    };
    info!(wrapper = %invoker.describe(), fixtures = %fixture_dir.display(), "running acceptance");
    let results = verify(&invoker, &wrapper_dir, &fixture_dir, &validator);
    Ok(AcceptanceReport {
        wrapper: invoker.describe(),
        fixtures: fixture_dir.to_string_lossy().to_string(),
        schema: schema_path.to_string_lossy().to_string(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    /// Replays a canned outcome and remembers how it was called.
    struct FakeInvoker {
        outcome: ProcessOutcome,
        calls: RefCell<Vec<(Vec<String>, PathBuf)>>,
    }

    impl FakeInvoker {
        fn new(code: i32, stdout: &str, stderr: &str) -> Self {
            FakeInvoker {
                outcome: ProcessOutcome {
                    completion: Completion::Exited(code),
                    stdout: stdout.into(),
                    stderr: stderr.into(),
                },
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl WrapperInvoker for FakeInvoker {
        fn invoke(&self, args: &[String], cwd: &Path) -> ProcessOutcome {
            self.calls
                .borrow_mut()
                .push((args.to_vec(), cwd.to_path_buf()));
            self.outcome.clone()
        }

        fn describe(&self) -> String {
            "fake".into()
        }
    }

    fn object_schema() -> Validator {
        jsonschema::validator_for(&serde_json::json!({"type": "object"})).unwrap()
    }

    fn write_json(dir: &Path, body: &str) -> String {
        let p = dir.join("x.json");
        fs::write(&p, body).unwrap();
        p.to_string_lossy().to_string()
    }

    fn labels_failed(r: &AcceptanceResult) -> Vec<&str> {
        r.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.label.as_str())
            .collect()
    }

    #[test]
    fn test_pass_fixture_all_checks_succeed() {
        let dir = tempdir().unwrap();
        let path = write_json(dir.path(), r#"{"a":1}"#);
        let inv = FakeInvoker::new(0, &format!("✅ OK (details: {})\n", path), "");
        let r = run_scenario(&inv, Scenario::PassFixture, dir.path(), &object_schema());
        assert!(r.passed(), "{:?}", r.checks);
        assert_eq!(r.checks.len(), 7);
        assert_eq!(inv.calls.borrow()[0].0, vec!["src/"]);
    }

    #[test]
    fn test_wrong_exit_code_does_not_stop_other_checks() {
        let dir = tempdir().unwrap();
        let path = write_json(dir.path(), r#"{"a":1}"#);
        let inv = FakeInvoker::new(3, &format!("✅ OK (details: {})\n", path), "");
        let r = run_scenario(&inv, Scenario::PassFixture, dir.path(), &object_schema());
        assert!(!r.passed());
        assert_eq!(labels_failed(&r), vec!["Exit code is 0"]);
        assert_eq!(r.find("Exit code is 0").unwrap().detail, "got 3");
        assert!(r.find("Output contains success marker").unwrap().passed);
        assert!(r.find("Output is terse (1 line)").unwrap().passed);
        assert!(r.find("JSON validates against schema").unwrap().passed);
        assert!(r.find("JSON output is non-empty").unwrap().passed);
    }

    #[test]
    fn test_no_args_scenario() {
        let dir = tempdir().unwrap();
        let inv = FakeInvoker::new(2, "", "❌ error\n");
        let r = run_scenario(&inv, Scenario::NoArgs, dir.path(), &object_schema());
        assert!(r.passed(), "{:?}", r.checks);
        assert!(r.find("Exit code is 2").is_some());
        assert!(r.find("Output contains error marker").is_some());
        assert!(r.find("JSON path found in output").is_none());
        assert!(inv.calls.borrow()[0].0.is_empty());
    }

    #[test]
    fn test_fail_fixture_line_count_reports_actual_count() {
        let dir = tempdir().unwrap();
        let path = write_json(dir.path(), r#"{"a":1}"#);
        let stdout = format!(
            "❌ T: 5 issues\n   - a\n   - b\n   - c\n   - d\n   (details: {})\n",
            path
        );
        let inv = FakeInvoker::new(1, &stdout, "");
        let r = run_scenario(&inv, Scenario::FailFixture, dir.path(), &object_schema());
        assert_eq!(labels_failed(&r), vec!["Output is terse (2-5 lines)"]);
        assert_eq!(r.find("Output is terse (2-5 lines)").unwrap().detail, "got 6 lines");
        assert!(r.find("Exit code is 1").unwrap().passed);
        assert!(r.find("Output contains failure marker").unwrap().passed);
    }

    #[test]
    fn test_streams_are_combined() {
        let dir = tempdir().unwrap();
        let path = write_json(dir.path(), r#"[1]"#);
        let inv = FakeInvoker::new(1, "❌ T: 1 issue\n", &format!("   (details: {})\n", path));
        let r = run_scenario(&inv, Scenario::FailFixture, dir.path(), &object_schema());
        assert!(r.find("JSON path found in output").unwrap().passed);
        assert!(r.find("Output is terse (2-5 lines)").unwrap().passed);
        // an array is non-empty but does not satisfy {"type":"object"}
        assert!(!r.find("JSON validates against schema").unwrap().passed);
        assert!(r.find("JSON output is non-empty").unwrap().passed);
    }

    #[test]
    fn test_missing_path_and_missing_file_are_distinct_failures() {
        let dir = tempdir().unwrap();
        let inv = FakeInvoker::new(0, "✅ OK\n", "");
        let r = run_scenario(&inv, Scenario::PassFixture, dir.path(), &object_schema());
        assert!(!r.find("JSON path found in output").unwrap().passed);
        assert!(r.find("JSON file exists").is_none());

        let gone = dir.path().join("gone.json").to_string_lossy().to_string();
        let inv = FakeInvoker::new(0, &format!("✅ OK (details: {})\n", gone), "");
        let r = run_scenario(&inv, Scenario::PassFixture, dir.path(), &object_schema());
        assert!(r.find("JSON path found in output").unwrap().passed);
        let exists = r.find("JSON file exists").unwrap();
        assert!(!exists.passed);
        assert_eq!(exists.detail, format!("{} not found", gone));
    }

    #[test]
    fn test_unparseable_and_empty_json() {
        let dir = tempdir().unwrap();
        let path = write_json(dir.path(), "{not json");
        let inv = FakeInvoker::new(0, &format!("✅ OK (details: {})\n", path), "");
        let r = run_scenario(&inv, Scenario::PassFixture, dir.path(), &object_schema());
        assert_eq!(labels_failed(&r), vec!["JSON file parses"]);

        let path = write_json(dir.path(), "{}");
        let inv = FakeInvoker::new(0, &format!("✅ OK (details: {})\n", path), "");
        let r = run_scenario(&inv, Scenario::PassFixture, dir.path(), &object_schema());
        assert_eq!(labels_failed(&r), vec!["JSON output is non-empty"]);
    }

    #[test]
    fn test_timeout_is_a_failing_check() {
        let dir = tempdir().unwrap();
        let inv = FakeInvoker {
            outcome: ProcessOutcome {
                completion: Completion::TimedOut,
                stdout: String::new(),
                stderr: "timed out".into(),
            },
            calls: RefCell::new(Vec::new()),
        };
        let r = run_scenario(&inv, Scenario::NoArgs, dir.path(), &object_schema());
        let c = r.find("Process completed").unwrap();
        assert!(!c.passed);
        assert_eq!(c.detail, "process did not complete in time");
        assert_eq!(r.find("Exit code is 2").unwrap().detail, "got none");
    }

    #[test]
    fn test_verify_runs_only_present_fixtures() {
        let wrapper = tempdir().unwrap();
        let fixtures = tempdir().unwrap();
        fs::create_dir_all(fixtures.path().join("fail/src")).unwrap();
        let inv = FakeInvoker::new(2, "❌ nope\n", "");
        let results = verify(&inv, wrapper.path(), fixtures.path(), &object_schema());
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Fail Fixture", "No Args (Error Case)"]);
        let calls = inv.calls.borrow();
        assert_eq!(calls[0].1, fixtures.path().join("fail"));
        assert_eq!(calls[1].1, wrapper.path().to_path_buf());
    }

    #[test]
    fn test_find_json_path_and_line_count() {
        assert_eq!(
            find_json_path("✅ ok (details: /tmp/a-1.json)\n").as_deref(),
            Some("/tmp/a-1.json")
        );
        assert_eq!(find_json_path("(details: relative/a.json)"), None);
        assert_eq!(find_json_path("(details: /tmp/a.txt)"), None);
        assert_eq!(count_nonblank_lines("a\n\n  \nb\n"), 2);
    }

    #[test]
    fn test_detect_wrapper_command() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("schema.json"), "{}").unwrap();
        assert!(detect_wrapper_command(dir.path()).is_none());
        fs::write(dir.path().join("llm-ruff.py"), "").unwrap();
        let cmd = detect_wrapper_command(dir.path()).unwrap();
        assert_eq!(cmd[0], "python3");
        assert!(cmd[1].ends_with("llm-ruff.py"));
    }

    #[test]
    fn test_load_validator_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("schema.json");
        assert!(matches!(
            load_validator(&missing),
            Err(QawrapError::SchemaMissing(_))
        ));
        fs::write(&missing, "{").unwrap();
        assert!(matches!(
            load_validator(&missing),
            Err(QawrapError::SchemaInvalid { .. })
        ));
        fs::write(&missing, r#"{"type":"object"}"#).unwrap();
        assert!(load_validator(&missing).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_real_wrapper_script_end_to_end() {
        let wrapper = tempdir().unwrap();
        let fixtures = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir_all(fixtures.path().join("pass/src")).unwrap();
        fs::create_dir_all(fixtures.path().join("fail/src")).unwrap();
        fs::write(fixtures.path().join("fail/src/broken"), "").unwrap();
        let json = write_json(out.path(), r#"{"tool":"fake","results":[]}"#);
        let script = wrapper.path().join("wrapper.sh");
        fs::write(
            &script,
            format!(
                r#"if [ $# -eq 0 ]; then echo "❌ fake: No targets specified" >&2; exit 2; fi
if [ -e src/broken ]; then
  echo "❌ fake: 1 issue"
  echo "   - src/broken"
  echo "   (details: {json})"
  exit 1
fi
echo "✅ fake: clean (details: {json})"
"#
            ),
        )
        .unwrap();
        fs::write(wrapper.path().join("schema.json"), r#"{"type":"object","required":["tool"]}"#).unwrap();

        let report = run_acceptance(&AcceptOptions {
            wrapper_dir: wrapper.path().to_path_buf(),
            fixture_dir: fixtures.path().to_path_buf(),
            wrapper: Some(format!("sh {}", script.display())),
            schema: None,
            timeout: Duration::from_secs(30),
            base_dir: None,
        })
        .unwrap();
        assert_eq!(report.results.len(), 3);
        for r in &report.results {
            assert!(r.passed(), "{}: {:?}", r.name, r.checks);
        }
        assert!(report.passed());
    }

    #[test]
    fn test_resolve_wrapper_command_makes_existing_paths_absolute() {
        let base = tempdir().unwrap();
        fs::create_dir_all(base.path().join("w")).unwrap();
        fs::write(base.path().join("w/llm-x.sh"), "").unwrap();
        let cmd = resolve_wrapper_command("sh w/llm-x.sh --strict", base.path());
        assert_eq!(cmd[0], "sh");
        assert_eq!(
            PathBuf::from(&cmd[1]),
            base.path().join("w/llm-x.sh").canonicalize().unwrap()
        );
        assert_eq!(cmd[2], "--strict");
        let cmd = resolve_wrapper_command("sh /opt/llm-x.sh", base.path());
        assert_eq!(cmd, vec!["sh", "/opt/llm-x.sh"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_wrapper_command_runs_from_fixture_dirs() {
        let base = tempdir().unwrap();
        let root = base.path();
        fs::create_dir_all(root.join("w")).unwrap();
        fs::create_dir_all(root.join("f/pass/src")).unwrap();
        let json = write_json(root, r#"{"tool":"x"}"#);
        fs::write(
            root.join("w/llm-x.sh"),
            format!(
                r#"if [ $# -eq 0 ]; then echo "❌ x: No targets specified" >&2; exit 2; fi
echo "✅ x: clean (details: {json})"
"#
            ),
        )
        .unwrap();
        fs::write(root.join("w/schema.json"), r#"{"type":"object"}"#).unwrap();

        let report = run_acceptance(&AcceptOptions {
            wrapper_dir: PathBuf::from("w"),
            fixture_dir: PathBuf::from("f"),
            wrapper: Some("sh w/llm-x.sh".into()),
            schema: None,
            timeout: Duration::from_secs(30),
            base_dir: Some(root.to_path_buf()),
        })
        .unwrap();
        assert_eq!(report.results.len(), 2);
        for r in &report.results {
            assert!(r.passed(), "{}: {:?}", r.name, r.checks);
        }
        assert!(report.wrapper.starts_with("sh /"));
    }

    #[test]
    fn test_run_acceptance_without_wrapper_is_an_error() {
        let wrapper = tempdir().unwrap();
        let err = run_acceptance(&AcceptOptions {
            wrapper_dir: wrapper.path().to_path_buf(),
            fixture_dir: wrapper.path().to_path_buf(),
            wrapper: None,
            schema: None,
            timeout: Duration::from_secs(1),
            base_dir: None,
        })
        .unwrap_err();
        assert!(matches!(err, QawrapError::WrapperNotFound(_)));
    }
}
