//! Configuration discovery and effective settings resolution.
//!
//! qawrap reads `qawrap.toml|yaml|yml` from the working directory (or the
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `output`: `human`
//! - `timeouts`: shfmt/shellcheck/ruff 60s, pytest/mypy 120s, version 10s,
//!   accept 30s
//! - `shell.extensions`: `sh`, `bash`, `ksh`, `zsh`
//! - `pytest.python`: `python3`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::discover::SHELL_EXTENSIONS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Default, Deserialize, Clone)]
/// Per-invocation time bounds in seconds under `[timeouts]`.
pub struct TimeoutsCfg {
    pub shfmt: Option<u64>,
    pub shellcheck: Option<u64>,
    pub ruff: Option<u64>,
    pub mypy: Option<u64>,
    pub pytest: Option<u64>,
    pub version: Option<u64>,
    pub accept: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct ShellCfg {
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct PytestCfg {
    pub python: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `qawrap.toml|yaml`.
pub struct QawrapConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub timeouts: Option<TimeoutsCfg>,
    #[serde(default)]
    pub shell: Option<ShellCfg>,
    #[serde(default)]
    pub pytest: Option<PytestCfg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Resolved time bounds.
pub struct Timeouts {
    pub shfmt: Duration,
    pub shellcheck: Duration,
    pub ruff: Duration,
    pub mypy: Duration,
    pub pytest: Duration,
    pub version: Duration,
    pub accept: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            shfmt: Duration::from_secs(60),
            shellcheck: Duration::from_secs(60),
            ruff: Duration::from_secs(60),
            mypy: Duration::from_secs(120),
            pytest: Duration::from_secs(120),
            version: Duration::from_secs(10),
            accept: Duration::from_secs(30),
        }
    }
}

impl Timeouts {
    fn merged(cfg: Option<&TimeoutsCfg>) -> Self {
        let d = Timeouts::default();
        let Some(c) = cfg else {
            return d;
        };
        let pick = |v: Option<u64>, fallback: Duration| v.map(Duration::from_secs).unwrap_or(fallback);
        Timeouts {
            shfmt: pick(c.shfmt, d.shfmt),
            shellcheck: pick(c.shellcheck, d.shellcheck),
            ruff: pick(c.ruff, d.ruff),
            mypy: pick(c.mypy, d.mypy),
            pytest: pick(c.pytest, d.pytest),
            version: pick(c.version, d.version),
            accept: pick(c.accept, d.accept),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub output: String,
    pub timeouts: Timeouts,
    pub shell_extensions: Vec<String>,
    pub python: String,
}

impl Default for Effective {
    fn default() -> Self {
        Effective {
            output: "human".to_string(),
            timeouts: Timeouts::default(),
            shell_extensions: SHELL_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            python: "python3".to_string(),
        }
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `qawrap.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("qawrap.toml").exists()
            || cur.join("qawrap.yaml").exists()
            || cur.join("qawrap.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `QawrapConfig` from `qawrap.toml` or `qawrap.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<QawrapConfig> {
    let toml_path = root.join("qawrap.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: QawrapConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["qawrap.yaml", "qawrap.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: QawrapConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli_repo_root: Option<&str>, cli_output: Option<&str>) -> Effective {
    let start = match cli_repo_root {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();
    let defaults = Effective::default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or(defaults.output);
    let timeouts = Timeouts::merged(cfg.timeouts.as_ref());
    let shell_extensions = cfg
        .shell
        .and_then(|s| s.extensions)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.into_iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        })
        .unwrap_or(defaults.shell_extensions);
    let python = cfg
        .pytest
        .and_then(|p| p.python)
        .unwrap_or(defaults.python);

    debug!(root = %repo_root.display(), %output, "resolved config");
    Effective {
        output,
        timeouts,
        shell_extensions,
        python,
    }
}
