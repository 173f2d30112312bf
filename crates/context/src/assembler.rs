//! Context assembly pipeline for the Memory Bank.
//!
//! Builds the `additionalContext` text from up to three files:
//!
//! 1. **brief** (`memory-bank/brief.md`)
//! 2. **active** (`memory-bank/active.md`)
//! 3. **index** (`memory-bank/_index.md`)
//!
//! # Determinism
//!
//! Assembly is deterministic: the same files always produce the same text.
//! Section order is fixed by [`MEMORY_BANK_FILES`] and never depends on
//! directory listing order or timestamps.

use crate::truncate::{Truncated, char_len, truncate_to_budget};
use membank_config::{DEFAULT_MAX_CHARS, HookConfig};
use membank_core::memory_bank::{
    BANNER, MEMORY_BANK_FILES, SECTION_SEPARATOR, memory_bank_dir, read_file_lossy,
};
use membank_core::{FileError, FileSpec};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ── Types ─────────────────────────────────────────────────────────────────

/// One non-blank Memory Bank file, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSection {
    pub label: &'static str,
    pub rel_path: &'static str,
    /// File content with surrounding whitespace trimmed.
    pub content: String,
}

impl ContextSection {
    /// `## <path>` heading, blank line, content.
    pub fn render(&self) -> String {
        format!("## {}\n\n{}", self.rel_path, self.content)
    }
}

/// Which file contributed to a document, and how much.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionInfo {
    pub label: &'static str,
    pub rel_path: &'static str,
    /// Characters of trimmed content.
    pub chars: usize,
}

impl From<&ContextSection> for SectionInfo {
    fn from(section: &ContextSection) -> Self {
        Self {
            label: section.label,
            rel_path: section.rel_path,
            chars: char_len(&section.content),
        }
    }
}

/// The assembled (and possibly truncated) context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    /// Text to inject; at most the configured budget in characters.
    pub text: String,
    /// Files that produced a section, in order.
    pub files: Vec<SectionInfo>,
    /// Length of the assembled text before truncation.
    pub total_chars: usize,
    pub truncated: bool,
}

/// Result of trying to load a single Memory Bank file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Missing,
    Unreadable(String),
    /// Exists but is empty or whitespace-only.
    Blank,
    Loaded(ContextSection),
}

/// Per-file line of an [`Inspection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub label: &'static str,
    pub rel_path: &'static str,
    pub status: FileState,
    /// Trimmed characters; zero unless loaded.
    pub chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    Missing,
    Unreadable,
    Blank,
    Loaded,
}

/// Diagnostic view of what the hook would do for a project root.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub project_root: PathBuf,
    pub memory_bank_found: bool,
    pub max_chars: usize,
    pub files: Vec<FileReport>,
    /// Assembled length before truncation (0 when nothing is injected).
    pub total_chars: usize,
    /// Length of `additionalContext` that would be emitted.
    pub injected_chars: usize,
    pub truncated: bool,
}

impl Inspection {
    pub fn would_inject(&self) -> bool {
        self.injected_chars > 0
    }
}

// ── Assembler ─────────────────────────────────────────────────────────────

/// The context assembler. Stateless apart from its budget.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    max_chars: usize,
}

impl ContextAssembler {
    /// Create a new assembler with the given character budget.
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Create an assembler with the default budget (12000 characters).
    pub fn with_default_budget() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }

    pub fn from_config(config: &HookConfig) -> Self {
        Self::new(config.max_chars)
    }

    /// The `memory-bank/` directory under `root`, if it exists.
    pub fn locate(root: &Path) -> Option<PathBuf> {
        let dir = memory_bank_dir(root);
        dir.exists().then_some(dir)
    }

    /// Load one file. Never fails: problems become [`FileStatus`] variants.
    pub fn load_file(root: &Path, spec: &FileSpec) -> FileStatus {
        match read_file_lossy(&spec.path(root)) {
            Ok(raw) => {
                let content = raw.trim();
                if content.is_empty() {
                    debug!(file = spec.rel_path, "Memory Bank file is blank");
                    FileStatus::Blank
                } else {
                    debug!(file = spec.rel_path, "Loaded Memory Bank file");
                    FileStatus::Loaded(ContextSection {
                        label: spec.label,
                        rel_path: spec.rel_path,
                        content: content.to_string(),
                    })
                }
            }
            Err(FileError::NotFound { .. }) => FileStatus::Missing,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable Memory Bank file");
                FileStatus::Unreadable(e.to_string())
            }
        }
    }

    /// Load every Memory Bank file with content, in injection order.
    pub fn load_files(root: &Path) -> Vec<ContextSection> {
        MEMORY_BANK_FILES
            .iter()
            .filter_map(|spec| match Self::load_file(root, spec) {
                FileStatus::Loaded(section) => Some(section),
                _ => None,
            })
            .collect()
    }

    /// Banner plus sections, or `None` when there are no sections.
    pub fn assemble(sections: &[ContextSection]) -> Option<String> {
        if sections.is_empty() {
            return None;
        }

        let body = sections
            .iter()
            .map(ContextSection::render)
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR);

        let mut out = String::with_capacity(BANNER.len() + body.len());
        out.push_str(BANNER);
        out.push_str(&body);
        Some(out)
    }

    /// Run the whole pipeline for `root`.
    ///
    /// Returns `None` when there is nothing to inject: no `memory-bank/`
    /// directory, or none of the files has content.
    pub fn build(&self, root: &Path) -> Option<ContextDocument> {
        let Some(dir) = Self::locate(root) else {
            debug!(root = %root.display(), "No memory-bank directory");
            return None;
        };

        let sections = Self::load_files(root);
        let Some(assembled) = Self::assemble(&sections) else {
            debug!(dir = %dir.display(), "Memory Bank has no content to inject");
            return None;
        };

        let total_chars = char_len(&assembled);
        let Truncated { text, truncated } = truncate_to_budget(assembled, self.max_chars);
        if truncated {
            info!(
                total_chars,
                max_chars = self.max_chars,
                "Memory Bank context truncated"
            );
        }

        let files: Vec<SectionInfo> = sections.iter().map(SectionInfo::from).collect();
        debug!(
            files = files.len(),
            total_chars,
            injected_chars = char_len(&text),
            "Memory Bank context assembled"
        );

        Some(ContextDocument {
            text,
            files,
            total_chars,
            truncated,
        })
    }

    /// Report per-file status and the resulting sizes without emitting anything.
    pub fn inspect(&self, root: &Path) -> Inspection {
        let memory_bank_found = Self::locate(root).is_some();

        let files = MEMORY_BANK_FILES
            .iter()
            .map(|spec| {
                let (status, chars, error) = if memory_bank_found {
                    match Self::load_file(root, spec) {
                        FileStatus::Missing => (FileState::Missing, 0, None),
                        FileStatus::Unreadable(e) => (FileState::Unreadable, 0, Some(e)),
                        FileStatus::Blank => (FileState::Blank, 0, None),
                        FileStatus::Loaded(s) => (FileState::Loaded, char_len(&s.content), None),
                    }
                } else {
                    (FileState::Missing, 0, None)
                };
                FileReport {
                    label: spec.label,
                    rel_path: spec.rel_path,
                    status,
                    chars,
                    error,
                }
            })
            .collect();

        let document = self.build(root);
        Inspection {
            project_root: root.to_path_buf(),
            memory_bank_found,
            max_chars: self.max_chars,
            files,
            total_chars: document.as_ref().map_or(0, |d| d.total_chars),
            injected_chars: document.as_ref().map_or(0, |d| char_len(&d.text)),
            truncated: document.as_ref().is_some_and(|d| d.truncated),
        }
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::with_default_budget()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use membank_core::memory_bank::TRUNCATION_NOTICE;
    use std::fs;

    const HELLO_CONTEXT: &str = "# Memory Bank Bootstrap (Auto-injected on SessionStart)\n\nUse `memory-bank/_index.md` to locate additional context files.\nRead more files from `memory-bank/` as needed based on the task.\n\n---\n\n## memory-bank/brief.md\n\nHello";

    /// Project root with `memory-bank/` and the given files written into it.
    fn project(files: &[(&str, &str)]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("memory-bank")).unwrap();
        for (name, content) in files {
            fs::write(tmp.path().join("memory-bank").join(name), content).unwrap();
        }
        tmp
    }

    #[test]
    fn brief_only_matches_reference_output() {
        let tmp = project(&[("brief.md", "Hello")]);
        let doc = ContextAssembler::new(100).build(tmp.path()).unwrap();
        assert_eq!(doc.text, HELLO_CONTEXT);
        assert!(!doc.truncated);
        assert_eq!(doc.total_chars, HELLO_CONTEXT.chars().count());
        assert_eq!(
            doc.files,
            vec![SectionInfo {
                label: "brief",
                rel_path: "memory-bank/brief.md",
                chars: 5
            }]
        );
    }

    #[test]
    fn no_memory_bank_dir_means_no_context() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(ContextAssembler::locate(tmp.path()).is_none());
        assert!(ContextAssembler::default().build(tmp.path()).is_none());
    }

    #[test]
    fn empty_memory_bank_dir_means_no_context() {
        let tmp = project(&[]);
        assert!(ContextAssembler::locate(tmp.path()).is_some());
        assert!(ContextAssembler::default().build(tmp.path()).is_none());
    }

    #[test]
    fn blank_files_mean_no_context() {
        let tmp = project(&[("brief.md", ""), ("active.md", "  \n\t\n"), ("_index.md", "\n")]);
        assert!(ContextAssembler::default().build(tmp.path()).is_none());
    }

    #[test]
    fn every_subset_keeps_fixed_order() {
        let names = ["brief.md", "active.md", "_index.md"];
        for mask in 0u8..8 {
            let files: Vec<(&str, &str)> = names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let present = mask & (1 << i) != 0;
                    (*name, if present { "content" } else { "   " })
                })
                .collect();
            let tmp = project(&files);
            let doc = ContextAssembler::default().build(tmp.path());

            let expected: Vec<&str> = names
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, n)| *n)
                .collect();

            match doc {
                None => assert!(expected.is_empty(), "mask {mask}"),
                Some(doc) => {
                    let got: Vec<&str> = doc
                        .files
                        .iter()
                        .map(|f| f.rel_path.trim_start_matches("memory-bank/"))
                        .collect();
                    assert_eq!(got, expected, "mask {mask}");
                    let headings = doc.text.matches("\n## memory-bank/").count();
                    assert_eq!(headings, expected.len(), "mask {mask}");
                }
            }
        }
    }

    #[test]
    fn sections_joined_with_separator_and_trimmed() {
        let tmp = project(&[
            ("brief.md", "\n\n  Brief body  \n"),
            ("active.md", "Active body\n"),
            ("_index.md", "Index body"),
        ]);
        let doc = ContextAssembler::default().build(tmp.path()).unwrap();
        let expected = format!(
            "{BANNER}## memory-bank/brief.md\n\nBrief body\n\n---\n\n## memory-bank/active.md\n\nActive body\n\n---\n\n## memory-bank/_index.md\n\nIndex body"
        );
        assert_eq!(doc.text, expected);
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let tmp = project(&[("active.md", "Working on X"), ("notes.md", "ignore me")]);
        let doc = ContextAssembler::default().build(tmp.path()).unwrap();
        assert!(doc.text.contains("Working on X"));
        assert!(!doc.text.contains("ignore me"));
    }

    #[test]
    fn oversized_context_is_truncated_to_budget() {
        let big = "b".repeat(20_000);
        let tmp = project(&[("brief.md", big.as_str())]);
        let doc = ContextAssembler::default().build(tmp.path()).unwrap();
        assert!(doc.truncated);
        assert_eq!(doc.text.chars().count(), DEFAULT_MAX_CHARS);
        assert!(doc.text.ends_with(TRUNCATION_NOTICE));
        assert!(doc.total_chars > DEFAULT_MAX_CHARS);
    }

    #[test]
    fn unreadable_entry_is_skipped() {
        // A directory where a file is expected cannot be read as text.
        let tmp = project(&[("active.md", "Active")]);
        fs::create_dir_all(tmp.path().join("memory-bank/brief.md")).unwrap();

        let status = ContextAssembler::load_file(tmp.path(), &MEMORY_BANK_FILES[0]);
        assert!(matches!(status, FileStatus::Unreadable(_)));

        let doc = ContextAssembler::default().build(tmp.path()).unwrap();
        assert_eq!(doc.files.len(), 1);
        assert_eq!(doc.files[0].label, "active");
    }

    #[test]
    fn invalid_utf8_content_is_kept_with_replacement() {
        let tmp = project(&[]);
        fs::write(tmp.path().join("memory-bank/brief.md"), [b'H', b'i', 0xff]).unwrap();
        let doc = ContextAssembler::default().build(tmp.path()).unwrap();
        assert!(doc.text.ends_with("Hi\u{FFFD}"));
    }

    #[test]
    fn inspect_reports_each_file() {
        let tmp = project(&[("brief.md", "Hello"), ("active.md", "   ")]);
        let report = ContextAssembler::new(100).inspect(tmp.path());

        assert!(report.memory_bank_found);
        assert_eq!(report.max_chars, 100);
        let states: Vec<FileState> = report.files.iter().map(|f| f.status).collect();
        assert_eq!(
            states,
            [FileState::Loaded, FileState::Blank, FileState::Missing]
        );
        assert_eq!(report.files[0].chars, 5);
        assert_eq!(report.injected_chars, HELLO_CONTEXT.chars().count());
        assert!(!report.truncated);
        assert!(report.would_inject());
    }

    #[test]
    fn inspect_without_memory_bank() {
        let tmp = tempfile::tempdir().unwrap();
        let report = ContextAssembler::default().inspect(tmp.path());
        assert!(!report.memory_bank_found);
        assert!(!report.would_inject());
        assert!(report.files.iter().all(|f| f.status == FileState::Missing));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["status"], "missing");
        assert!(json["files"][0].get("error").is_none());
    }
}
