//! qawrap CLI binary entry point.
//! Dispatches to wrappers or the acceptance verifier and maps results to
//! exit codes: 0 clean, 1 findings, 2 invocation error.

use clap::Parser;
use qawrap::accept::{self, AcceptOptions};
use qawrap::cli::{Cli, Commands, TargetArgs};
use qawrap::config;
use qawrap::output::{self, FAILURE_MARKER};
use qawrap::wrappers::{self, Tool};
use qawrap::{error::QawrapError, logging};
use std::path::PathBuf;

fn run_wrapper(tool: Tool, args: TargetArgs) -> i32 {
    let eff = config::resolve_effective(args.repo_root.as_deref(), None);
    match wrappers::run_tool(tool, &args.paths, &eff) {
        Ok(verdict) => {
            for line in &verdict.lines {
                println!("{}", line);
            }
            verdict.exit_code
        }
        Err(err) => {
            let usage = matches!(err, QawrapError::NoTargets);
            for line in output::error_lines(tool.label(), tool.id(), &err.to_string(), usage) {
                eprintln!("{}", line);
            }
            2
        }
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let code = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            0
        }
        Commands::Shfmt(args) => run_wrapper(Tool::Shfmt, args),
        Commands::Shellcheck(args) => run_wrapper(Tool::Shellcheck, args),
        Commands::Pytest(args) => run_wrapper(Tool::Pytest, args),
        Commands::Ruff(args) => run_wrapper(Tool::Ruff, args),
        Commands::Mypy(args) => run_wrapper(Tool::Mypy, args),
        Commands::Accept {
            wrapper_dir,
            fixture_dir,
            wrapper,
            schema,
            output,
            repo_root,
        } => {
            let eff = config::resolve_effective(repo_root.as_deref(), output.as_deref());
            let opts = AcceptOptions {
                wrapper_dir: PathBuf::from(wrapper_dir),
                fixture_dir: PathBuf::from(fixture_dir),
                wrapper,
                schema: schema.map(PathBuf::from),
                timeout: eff.timeouts.accept,
                base_dir: None,
            };
            match accept::run_acceptance(&opts) {
                Ok(report) => {
                    output::print_accept(&report, &eff.output);
                    if report.passed() {
                        0
                    } else {
                        1
                    }
                }
                Err(err) => {
                    eprintln!("{} {}", FAILURE_MARKER, err);
                    2
                }
            }
        }
    };
    std::process::exit(code);
}
