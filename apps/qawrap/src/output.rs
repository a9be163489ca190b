//! Output rendering for wrappers and the acceptance verifier.
//!
//! Wrapper output is plain, uncolored text built around two marker glyphs
//! so it stays machine-greppable. The acceptance report supports `human`
//! (default) and `json` outputs.

use crate::models::{AcceptanceReport, AcceptanceResult};
use owo_colors::OwoColorize;

/// Check-mark glyph of the success line.
pub const SUCCESS_MARKER: &str = "\u{2705}";
/// Cross-mark glyph of failure and error lines.
pub const FAILURE_MARKER: &str = "\u{274c}";

const MAX_EXAMPLES: usize = 3;
const RULE_WIDTH: usize = 60;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `✅ <Tool>: <text> (details: <path>)`
pub fn success_line(label: &str, text: &str, details: &str) -> String {
    format!("{} {}: {} (details: {})", SUCCESS_MARKER, label, text, details)
}

/// Headline, up to three example lines, and the details reference.
pub fn failure_lines(label: &str, headline: &str, examples: &[String], details: &str) -> Vec<String> {
    let mut lines = vec![format!("{} {}: {}", FAILURE_MARKER, label, headline)];
    for ex in examples.iter().take(MAX_EXAMPLES) {
        lines.push(format!("   - {}", one_line(ex)));
    }
    lines.push(format!("   (details: {})", details));
    lines
}

/// Invocation error lines for stderr. A usage hint follows when no targets
/// were given.
pub fn error_lines(label: &str, tool_id: &str, message: &str, usage: bool) -> Vec<String> {
    let mut lines = vec![format!("{} {}: {}", FAILURE_MARKER, label, message)];
    if usage {
        lines.push(format!("   Usage: qawrap {} <path> [...paths]", tool_id));
    }
    lines
}

/// Print an acceptance report in the requested format.
pub fn print_accept(report: &AcceptanceReport, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_accept_json(report)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", FAILURE_MARKER, e),
        },
        _ => println!("{}", render_accept(report, use_colors(output))),
    }
}

/// Compose the acceptance JSON object (pure) for testing purposes.
pub fn compose_accept_json(report: &AcceptanceReport) -> serde_json::Value {
    let scenarios: Vec<_> = report
        .results
        .iter()
        .map(|r| {
            serde_json::json!({
                "name": r.name,
                "passed": r.passed(),
                "checks": r.checks,
            })
        })
        .collect();
    serde_json::json!({
        "wrapper": report.wrapper,
        "fixtures": report.fixtures,
        "schema": report.schema,
        "passed": report.passed(),
        "results": scenarios,
    })
}

fn render_scenario(r: &AcceptanceResult, color: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![String::new(), rule.clone(), format!("  {}", r.name), rule];
    for c in &r.checks {
        let icon = match (c.passed, color) {
            (true, true) => "PASS".green().bold().to_string(),
            (false, true) => "FAIL".red().bold().to_string(),
            (true, false) => "PASS".to_string(),
            (false, false) => "FAIL".to_string(),
        };
        let mut line = format!("  [{}] {}", icon, c.label);
        if !c.detail.is_empty() {
            line.push_str(" - ");
            line.push_str(&c.detail);
        }
        lines.push(line);
    }
    let status = if r.passed() { "PASSED" } else { "FAILED" };
    lines.push(String::new());
    lines.push(format!("  Result: {}", status));
    lines.join("\n")
}

/// Render the human report.
pub fn render_accept(report: &AcceptanceReport, color: bool) -> String {
    let mut out = vec![
        String::new(),
        format!("Wrapper: {}", report.wrapper),
        format!("Fixtures: {}", report.fixtures),
        format!("Schema: {}", report.schema),
    ];
    for r in &report.results {
        out.push(render_scenario(r, color));
    }
    let rule = "=".repeat(RULE_WIDTH);
    let verdict = if report.passed() {
        "  ALL ACCEPTANCE TESTS PASSED"
    } else {
        "  SOME ACCEPTANCE TESTS FAILED"
    };
    out.push(String::new());
    out.push(rule.clone());
    out.push(if color {
        if report.passed() {
            verdict.green().bold().to_string()
        } else {
            verdict.red().bold().to_string()
        }
    } else {
        verdict.to_string()
    });
    out.push(rule);
    out.push(String::new());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> AcceptanceReport {
        let mut ok = AcceptanceResult::new("Pass Fixture");
        ok.check("Exit code is 0", true, "got 0");
        let mut bad = AcceptanceResult::new("No Args (Error Case)");
        bad.check("Exit code is 2", false, "got 0")
            .check("Output contains error marker", true, "");
        AcceptanceReport {
            wrapper: "python3 llm-x.py".into(),
            fixtures: "/f".into(),
            schema: "/w/schema.json".into(),
            results: vec![ok, bad],
        }
    }

    #[test]
    fn test_failure_lines_flatten_multiline_examples() {
        let lines = failure_lines(
            "MyPy",
            "1 errors in 1 files",
            &["a.py:1:1 [x] bad\n  thing".to_string()],
            "/tmp/m.json",
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "   - a.py:1:1 [x] bad thing");
    }

    #[test]
    fn test_error_lines_with_usage() {
        let lines = error_lines("shfmt", "shfmt", "No targets specified", true);
        assert_eq!(lines[0], "❌ shfmt: No targets specified");
        assert_eq!(lines[1], "   Usage: qawrap shfmt <path> [...paths]");
    }

    #[test]
    fn test_render_accept_plain() {
        let text = render_accept(&report(), false);
        assert!(text.contains("  [PASS] Exit code is 0 - got 0"));
        assert!(text.contains("  [FAIL] Exit code is 2 - got 0"));
        assert!(text.contains("  [PASS] Output contains error marker\n"));
        assert!(text.contains("  Result: FAILED"));
        assert!(text.contains("SOME ACCEPTANCE TESTS FAILED"));
        assert!(text.contains(&"=".repeat(60)));
    }

    #[test]
    fn test_compose_accept_json_shape() {
        let out = compose_accept_json(&report());
        assert_eq!(out["passed"], false);
        assert_eq!(out["results"][0]["passed"], true);
        assert_eq!(out["results"][1]["checks"][0]["label"], "Exit code is 2");
        assert_eq!(out["results"][1]["checks"][0]["detail"], "got 0");
    }
}
