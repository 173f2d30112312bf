//! Hook wire format — what the host writes to stdin and what we print back.
//!
//! The host sends a JSON object on stdin. Only `cwd` influences behaviour;
//! `session_id` and `source` are kept for log lines. Anything malformed is an
//! [`InputError`] which callers are expected to swallow.
//!
//! The output envelope is a single-line JSON object:
//!
//! ```json
//! {"hookSpecificOutput":{"hookEventName":"SessionStart","additionalContext":"..."}}
//! ```

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Read;

/// Event name the host expects in `hookSpecificOutput.hookEventName`.
pub const SESSION_START_EVENT: &str = "SessionStart";

/// The subset of the host's hook payload we care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookInput {
    /// Working directory of the session, used when no project dir is set.
    pub cwd: Option<String>,
    pub session_id: Option<String>,
    /// Why the session started (`startup`, `clear`, `compact`, ...).
    pub source: Option<String>,
}

impl HookInput {
    /// Parse a raw stdin payload.
    ///
    /// Blank input is an empty object. Fields of the wrong type are treated
    /// as absent rather than as errors.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value =
            serde_json::from_str(raw).map_err(|e| InputError::Parse(e.to_string()))?;
        let map = match value {
            Value::Object(map) => map,
            other => return Err(InputError::NotAnObject(json_kind(&other))),
        };

        Ok(Self {
            cwd: string_field(&map, "cwd"),
            session_id: string_field(&map, "session_id"),
            source: string_field(&map, "source"),
        })
    }

    /// Read the whole reader and parse it. Invalid UTF-8 is replaced, not rejected.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, InputError> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| InputError::Read(e.to_string()))?;
        Self::parse(&String::from_utf8_lossy(&buf))
    }

    /// Like [`HookInput::from_reader`], but any failure yields an empty input.
    pub fn from_reader_lenient<R: Read>(reader: R) -> Self {
        match Self::from_reader(reader) {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed hook input");
                Self::default()
            }
        }
    }

    /// The `cwd` field, if present and non-empty.
    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref().filter(|s| !s.is_empty())
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The envelope printed to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

impl HookOutput {
    /// Build a `SessionStart` envelope carrying the given context.
    pub fn session_start(context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: SESSION_START_EVENT.into(),
                additional_context: context.into(),
            },
        }
    }

    /// Serialize as one line of JSON. Non-ASCII text is written as-is.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
