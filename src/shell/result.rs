//! Command result type.

/// Outcome of one dispatched command line.
///
/// Screen-clear and edit requests are distinct variants rather than magic
/// substrings in the output; callers branch on the variant and choose their
/// own serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Plain text to display. May be empty or multi-line.
    Text(String),
    /// The caller should wipe its displayed scrollback.
    ClearScreen,
    /// An edit was requested and the target validated, but editing has no
    /// server-side backend.
    EditUnsupported,
    /// The session was ended by `exit`; its state is gone.
    Terminated,
}

impl CommandResult {
    /// Shorthand for a text result.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The text payload, if this is a text result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this result is a control signal rather than display text.
    pub fn is_control(&self) -> bool {
        !matches!(self, Self::Text(_))
    }
}

impl From<String> for CommandResult {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for CommandResult {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
