//! Memory Bank context assembly.
//!
//! Turns the files of a project's `memory-bank/` directory into the single
//! text blob injected at session start.
//!
//! | Step | What happens |
//! |------|--------------|
//! | Locate | `memory-bank/` must exist under the project root |
//! | Load | brief → active → index; missing or blank files skipped |
//! | Assemble | banner + `## <path>` sections joined by `---` |
//! | Truncate | cut to the character budget, notice appended |

pub mod assembler;
pub mod truncate;

pub use assembler::{
    ContextAssembler, ContextDocument, ContextSection, FileReport, FileState, FileStatus,
    Inspection, SectionInfo,
};
pub use truncate::{Truncated, truncate_to_budget};
