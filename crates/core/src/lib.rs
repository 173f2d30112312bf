//! # Memory Bank Core
//!
//! Domain types shared by every crate of the Memory Bank SessionStart hook:
//! the fixed set of Memory Bank files, the hook wire format, and the error
//! types. Nothing in here talks to stdin/stdout or the environment.

pub mod error;
pub mod hook;
pub mod memory_bank;

// Re-export key types at crate root for ergonomics
pub use error::{Error, FileError, InputError, Result};
pub use hook::{HookInput, HookOutput, HookSpecificOutput, SESSION_START_EVENT};
pub use memory_bank::{FileSpec, MEMORY_BANK_DIR, MEMORY_BANK_FILES};
