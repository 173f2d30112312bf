//! The Memory Bank layout — which files get injected and in what order.
//!
//! A Memory Bank is a `memory-bank/` directory of markdown files at the
//! project root. Only three of them are injected at session start:
//!
//! 1. **brief** — `memory-bank/brief.md` (what the project is)
//! 2. **active** — `memory-bank/active.md` (what is being worked on)
//! 3. **index** — `memory-bank/_index.md` (where everything else lives)
//!
//! Missing files are silently skipped.

use crate::error::FileError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory (relative to the project root) whose presence gates injection.
pub const MEMORY_BANK_DIR: &str = "memory-bank";

/// A Memory Bank file considered for injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSpec {
    pub label: &'static str,
    /// Path relative to the project root, also used as the section heading.
    pub rel_path: &'static str,
}

impl FileSpec {
    pub const fn new(label: &'static str, rel_path: &'static str) -> Self {
        Self { label, rel_path }
    }

    /// Absolute location of this file under `root`.
    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(self.rel_path)
    }
}

/// Injected files, in injection order.
pub const MEMORY_BANK_FILES: [FileSpec; 3] = [
    FileSpec::new("brief", "memory-bank/brief.md"),
    FileSpec::new("active", "memory-bank/active.md"),
    FileSpec::new("index", "memory-bank/_index.md"),
];

/// Banner placed before the first section.
pub const BANNER: &str = concat!(
    "# Memory Bank Bootstrap (Auto-injected on SessionStart)\n\n",
    "Use `memory-bank/_index.md` to locate additional context files.\n",
    "Read more files from `memory-bank/` as needed based on the task.\n\n",
    "---\n\n",
);

/// Placed between consecutive sections.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Appended when the context had to be cut to fit the budget.
pub const TRUNCATION_NOTICE: &str = "\n\n---\n\n[TRUNCATED] Memory Bank context exceeded size limit. Read files directly for complete content.";

/// The Memory Bank directory under `root`.
pub fn memory_bank_dir(root: &Path) -> PathBuf {
    root.join(MEMORY_BANK_DIR)
}

/// Read a file as text, replacing undecodable bytes with U+FFFD.
pub fn read_file_lossy(path: &Path) -> Result<String, FileError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(FileError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(FileError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn files_are_in_injection_order() {
        let labels: Vec<_> = MEMORY_BANK_FILES.iter().map(|f| f.label).collect();
        assert_eq!(labels, ["brief", "active", "index"]);
        assert!(
            MEMORY_BANK_FILES
                .iter()
                .all(|f| f.rel_path.starts_with("memory-bank/"))
        );
    }

    #[test]
    fn file_spec_path_joins_root() {
        let path = MEMORY_BANK_FILES[0].path(Path::new("/project"));
        assert_eq!(path, Path::new("/project").join("memory-bank/brief.md"));
    }

    #[test]
    fn banner_ends_with_separator() {
        assert!(BANNER.starts_with("# Memory Bank Bootstrap"));
        assert!(BANNER.ends_with("\n\n---\n\n"));
    }

    #[test]
    fn notice_length_is_stable() {
        assert!(TRUNCATION_NOTICE.starts_with(SECTION_SEPARATOR));
        assert_eq!(TRUNCATION_NOTICE.chars().count(), TRUNCATION_NOTICE.len());
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_file_lossy(&tmp.path().join("nope.md")).unwrap_err();
        assert!(matches!(err, FileError::NotFound { .. }));
    }

    #[test]
    fn read_directory_is_unreadable() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_file_lossy(tmp.path()).unwrap_err();
        match err {
            FileError::Unreadable { path, .. } => assert_eq!(path, tmp.path()),
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.md");
        fs::write(&path, [b'o', b'k', 0xff, 0xfe, b'!']).unwrap();
        let content = read_file_lossy(&path).unwrap();
        assert!(content.starts_with("ok"));
        assert!(content.contains('\u{FFFD}'));
        assert!(content.ends_with('!'));
    }
}
