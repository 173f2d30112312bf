//! Configuration resolution for the Memory Bank hook.
//!
//! There is no config file. Everything comes from environment variables and
//! the hook input, resolved once at startup:
//!
//! - `CLAUDE_PROJECT_DIR` — project root (highest priority)
//! - hook input `cwd` — project root when the env var is unset
//! - process working directory — last resort
//! - `MEMORY_BANK_MAX_CHARS` — character budget (default 12000)
//! - `MEMORY_BANK_DISABLED` — `1`/`true` turns the hook off
//! - `MEMORY_BANK_DEBUG` — `1` enables debug logging

use membank_core::HookInput;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use tracing::{debug, warn};

pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";
pub const MAX_CHARS_ENV: &str = "MEMORY_BANK_MAX_CHARS";
pub const DISABLED_ENV: &str = "MEMORY_BANK_DISABLED";
pub const DEBUG_ENV: &str = "MEMORY_BANK_DEBUG";

/// Default character budget for the injected context.
pub const DEFAULT_MAX_CHARS: usize = 12_000;

/// Resolved settings for one hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Directory expected to contain `memory-bank/`.
    pub project_root: PathBuf,
    /// Maximum characters of `additionalContext`.
    pub max_chars: usize,
    /// When set, the hook exits without output.
    pub disabled: bool,
}

impl HookConfig {
    /// Load configuration from the process environment.
    pub fn load(input: &HookInput) -> Self {
        Self::load_with(input, |key| std::env::var_os(key))
    }

    /// Load configuration using `lookup` in place of the environment.
    ///
    /// Values are raw `OsString`s so a project dir that is not valid UTF-8
    /// still wins over the hook input.
    pub fn load_with<F>(input: &HookInput, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let project_dir = lookup(PROJECT_DIR_ENV);
        let project_root = resolve_project_root(project_dir.as_deref(), input.cwd());

        let max_chars = match lookup(MAX_CHARS_ENV) {
            Some(raw) => parse_max_chars(&raw.to_string_lossy()).unwrap_or_else(|e| {
                warn!(error = %e, default = DEFAULT_MAX_CHARS, "Using default Memory Bank budget");
                DEFAULT_MAX_CHARS
            }),
            None => DEFAULT_MAX_CHARS,
        };

        let disabled = lookup(DISABLED_ENV).is_some_and(|v| is_truthy(&v.to_string_lossy()));

        let config = Self {
            project_root,
            max_chars,
            disabled,
        };
        debug!(
            project_root = %config.project_root.display(),
            max_chars = config.max_chars,
            disabled = config.disabled,
            "Resolved hook configuration"
        );
        config
    }

    /// Whether debug logging was requested through `MEMORY_BANK_DEBUG`.
    pub fn debug_requested<F>(lookup: F) -> bool
    where
        F: Fn(&str) -> Option<OsString>,
    {
        lookup(DEBUG_ENV).is_some_and(|v| v.to_string_lossy().trim() == "1")
    }
}

/// Pick the project root: explicit dir, then hook `cwd`, then the process cwd.
///
/// Empty values count as unset.
pub fn resolve_project_root(project_dir: Option<&OsStr>, input_cwd: Option<&str>) -> PathBuf {
    if let Some(dir) = project_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    if let Some(cwd) = input_cwd.filter(|c| !c.is_empty()) {
        return PathBuf::from(cwd);
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Parse a `MEMORY_BANK_MAX_CHARS` value. Must be a positive integer.
pub fn parse_max_chars(raw: &str) -> Result<usize, ConfigError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().map_err(|_| ConfigError::InvalidMaxChars {
        value: raw.to_string(),
        reason: "not an integer".into(),
    })?;
    if value <= 0 {
        return Err(ConfigError::InvalidMaxChars {
            value: raw.to_string(),
            reason: "must be greater than zero".into(),
        });
    }
    usize::try_from(value).map_err(|_| ConfigError::InvalidMaxChars {
        value: raw.to_string(),
        reason: "too large".into(),
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim(), "1" | "true")
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid MEMORY_BANK_MAX_CHARS value {value:?}: {reason}")]
    InvalidMaxChars { value: String, reason: String },
}
