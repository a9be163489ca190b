//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "qawrap",
    version,
    about = "Terse QA tool wrappers and a wrapper conformance verifier",
    long_about = "qawrap runs QA tools (shfmt, shellcheck, pytest, ruff, mypy), prints one terse verdict and writes the full result as a JSON envelope.\n\nIt can also verify that any wrapper obeys the same contract.\n\nConfiguration precedence: CLI > qawrap.toml > defaults.",
    after_help = "Examples:\n  qawrap shfmt scripts/\n  qawrap pytest tests/\n  qawrap accept wrappers/ruff fixtures/ruff\n  QAWRAP_LOG=debug qawrap mypy src/",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Debug, Clone)]
/// Arguments shared by every tool wrapper.
pub struct TargetArgs {
    #[arg(help = "Files or directories to check")]
    pub paths: Vec<String>,
    #[arg(long, help = "Repository root for config discovery (default: current dir)")]
    pub repo_root: Option<String>,
}

#[derive(Subcommand)]
/// Tool wrappers plus the conformance verifier.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current qawrap version.")]
    Version,
    #[command(
        about = "Check shell formatting with shfmt",
        after_help = "Examples:\n  qawrap shfmt scripts/ install.sh"
    )]
    Shfmt(TargetArgs),
    #[command(
        about = "Lint shell scripts with ShellCheck",
        after_help = "Examples:\n  qawrap shellcheck scripts/"
    )]
    Shellcheck(TargetArgs),
    #[command(
        about = "Run tests with pytest",
        long_about = "Run pytest verbosely and recover per-test statuses and failure blocks from its transcript.",
        after_help = "Examples:\n  qawrap pytest tests/"
    )]
    Pytest(TargetArgs),
    #[command(about = "Lint Python with Ruff", after_help = "Examples:\n  qawrap ruff src/")]
    Ruff(TargetArgs),
    #[command(about = "Type-check Python with MyPy", after_help = "Examples:\n  qawrap mypy src/")]
    Mypy(TargetArgs),
    /// Verify a wrapper against pass/fail fixtures
    #[command(
        about = "Verify a wrapper's black-box contract",
        long_about = "Run a wrapper against <fixture_dir>/pass, <fixture_dir>/fail and with no arguments, checking exit codes, output shape and the JSON details file.",
        after_help = "Examples:\n  qawrap accept wrappers/shfmt fixtures/shfmt\n  qawrap accept w/ f/ --wrapper 'node w/llm-eslint.js' --output json"
    )]
    Accept {
        #[arg(help = "Directory holding the wrapper and its schema.json")]
        wrapper_dir: String,
        #[arg(help = "Directory holding pass/ and fail/ fixtures")]
        fixture_dir: String,
        #[arg(long, help = "Wrapper command (default: detect llm-*.js|php|py)")]
        wrapper: Option<String>,
        #[arg(long, help = "Schema path (default: <wrapper_dir>/schema.json)")]
        schema: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Repository root for config discovery (default: current dir)")]
        repo_root: Option<String>,
    },
}
