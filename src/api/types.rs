//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionId};
use crate::shell::CommandResult;

/// Request to execute one terminal command line.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalRequest {
    /// The raw command line.
    pub command: String,
    /// Session to execute in. Absent, unknown, or stale IDs start a fresh
    /// session; the response carries the ID actually used.
    #[serde(default)]
    pub session_id: Option<u64>,
}

/// Wire-level tag for the shell's result variants.
///
/// Clients branch on this tag instead of sniffing magic substrings out of
/// the output text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// `output` is display text.
    Text,
    /// The client should clear its scrollback.
    Clear,
    /// Editing was requested but has no server-side backend.
    EditUnsupported,
    /// The session was ended; its ID is no longer valid.
    Terminated,
}

/// Response for command execution.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalResponse {
    /// Session the command ran in.
    pub session_id: u64,
    /// Human-readable session ID string.
    pub session_id_str: String,
    /// How to interpret `output`.
    pub kind: ResultKind,
    /// Display text, or a fixed notice for control results.
    pub output: String,
}

impl TerminalResponse {
    pub fn from_result(id: SessionId, result: &CommandResult) -> Self {
        let (kind, output) = match result {
            CommandResult::Text(text) => (ResultKind::Text, text.clone()),
            CommandResult::ClearScreen => (ResultKind::Clear, String::new()),
            CommandResult::EditUnsupported => {
                (ResultKind::EditUnsupported, "EDIT MODE NOT SUPPORTED".to_string())
            }
            CommandResult::Terminated => (ResultKind::Terminated, "Session ended.".to_string()),
        };
        Self {
            session_id: id.as_u64(),
            session_id_str: id.to_string(),
            kind,
            output,
        }
    }
}

/// Query parameters for the files endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesQuery {
    /// Root-relative directory; absent means the root itself.
    #[serde(default)]
    pub dir: Option<String>,
}

/// Response for session status query.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    /// Session ID.
    pub session_id: u64,
    /// Human-readable session ID string.
    pub session_id_str: String,
    /// Working directory rendered with the root label.
    pub cwd: String,
    /// Number of recorded history entries.
    pub history_len: usize,
    /// Pending edit target, if the client requested one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_edit: Option<String>,
    /// Idle duration in seconds.
    pub idle_seconds: f64,
}

impl SessionStatusResponse {
    pub fn new(session: &Session, cwd: String) -> Self {
        Self {
            session_id: session.id.as_u64(),
            session_id_str: session.id.to_string(),
            cwd,
            history_len: session.history().len(),
            pending_edit: session
                .edit_file()
                .map(|p| p.to_string_lossy().into_owned()),
            idle_seconds: session.idle_duration().as_secs_f64(),
        }
    }
}

/// List sessions response.
#[derive(Debug, Clone, Serialize)]
pub struct ListSessionsResponse {
    /// Total number of sessions.
    pub count: usize,
    /// Session summaries.
    pub sessions: Vec<SessionSummary>,
}

/// Brief session summary for listing.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: u64,
    pub cwd: String,
    pub history_len: usize,
    pub idle_seconds: f64,
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "SESSION_NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn session_not_found(id: &str) -> Self {
        Self::new("SESSION_NOT_FOUND", format!("Session '{}' not found", id))
    }

    pub fn invalid_directory() -> Self {
        Self::new("INVALID_DIRECTORY", "Invalid directory.")
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}
