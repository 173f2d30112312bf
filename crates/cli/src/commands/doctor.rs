//! `memory-bank-hook doctor` — Diagnose a project's Memory Bank.

use super::Overrides;
use membank_config::HookConfig;
use membank_context::{ContextAssembler, FileState, Inspection};
use membank_core::HookInput;
use std::io::Write;

pub fn run(overrides: &Overrides, json: bool) -> membank_core::Result<()> {
    let config = HookConfig::load_with(&HookInput::default(), |key| overrides.lookup(key));
    let report = ContextAssembler::from_config(&config).inspect(&config.project_root);

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &report, config.disabled, json)
}

/// Write the report, surfacing a closed or failing stream as an error.
fn write_report<W: Write>(
    out: &mut W,
    report: &Inspection,
    disabled: bool,
    json: bool,
) -> membank_core::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
    } else {
        write!(out, "{}", render_report(report, disabled))?;
    }
    out.flush()?;
    Ok(())
}

fn render_report(report: &Inspection, disabled: bool) -> String {
    let mut lines = vec![
        "🩺 Memory Bank Doctor".to_string(),
        "=====================".to_string(),
        String::new(),
        format!("  Project root:  {}", report.project_root.display()),
        format!("  Budget:        {} chars", report.max_chars),
        String::new(),
    ];

    if !report.memory_bank_found {
        lines.push("  ❌ No memory-bank/ directory — nothing will be injected".into());
    } else {
        lines.push("  ✅ memory-bank/ directory found".into());
        for file in &report.files {
            lines.push(match file.status {
                FileState::Loaded => format!("  ✅ {} ({} chars)", file.rel_path, file.chars),
                FileState::Blank => format!("  ⚠️  {} is empty — skipped", file.rel_path),
                FileState::Missing => format!("  ⚠️  {} not found — skipped", file.rel_path),
                FileState::Unreadable => format!(
                    "  ❌ {} unreadable: {}",
                    file.rel_path,
                    file.error.as_deref().unwrap_or("unknown error")
                ),
            });
        }
    }

    lines.push(String::new());
    if disabled {
        lines.push("  ⏸️  Hook disabled via MEMORY_BANK_DISABLED".into());
    } else if report.would_inject() {
        lines.push(format!(
            "  📦 Would inject {} of {} chars{}",
            report.injected_chars,
            report.total_chars,
            if report.truncated { " (truncated)" } else { "" }
        ));
    } else {
        lines.push("  ℹ️  Nothing to inject".into());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
