//! `memory-bank-hook session-start` — inject Memory Bank context.
//!
//! Reads the hook payload from stdin, assembles the context and prints one
//! JSON line. Prints nothing when there is nothing to inject.

use super::Overrides;
use membank_config::HookConfig;
use membank_context::ContextAssembler;
use membank_core::{HookInput, HookOutput};
use std::io::{self, IsTerminal, Write};
use tracing::debug;

pub fn run(overrides: &Overrides) -> membank_core::Result<()> {
    let input = read_hook_input();
    debug!(
        session_id = input.session_id.as_deref().unwrap_or("-"),
        source = input.source.as_deref().unwrap_or("-"),
        "SessionStart hook invoked"
    );

    let config = HookConfig::load_with(&input, |key| overrides.lookup(key));
    let Some(line) = render(&config)? else {
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(line.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// The JSON line to print, or `None` when nothing should be printed.
pub fn render(config: &HookConfig) -> Result<Option<String>, serde_json::Error> {
    if config.disabled {
        debug!("Memory Bank hook disabled");
        return Ok(None);
    }

    let Some(document) = ContextAssembler::from_config(config).build(&config.project_root) else {
        return Ok(None);
    };

    HookOutput::session_start(document.text)
        .to_json_line()
        .map(Some)
}

/// Stdin payload, or an empty one when stdin is a terminal or unparseable.
fn read_hook_input() -> HookInput {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return HookInput::default();
    }
    HookInput::from_reader_lenient(stdin.lock())
}
