pub mod doctor;
pub mod session_start;

use clap::Args;
use membank_config::{MAX_CHARS_ENV, PROJECT_DIR_ENV};
use std::ffi::OsString;

/// Flags that stand in for the environment lookups.
///
/// Both are read as raw OS strings so a value that is not valid UTF-8 is
/// still honoured instead of failing argument parsing.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Project root (falls back to the hook input `cwd`, then the current directory)
    #[arg(long, global = true, env = PROJECT_DIR_ENV)]
    pub project_dir: Option<OsString>,

    /// Maximum characters of injected context
    #[arg(long, global = true, env = MAX_CHARS_ENV)]
    pub max_chars: Option<OsString>,
}

impl Overrides {
    /// Environment lookup with flag values taking precedence.
    pub fn lookup(&self, key: &str) -> Option<OsString> {
        let flag = match key {
            PROJECT_DIR_ENV => self.project_dir.clone(),
            MAX_CHARS_ENV => self.max_chars.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var_os(key))
    }
}
