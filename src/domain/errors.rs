use std::fmt;

// Failure of a remote roster call. Absorbed by the resolver, never surfaced to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    Transport(String),
    Upstream {
        status: u16,
        message: Option<String>,
    },
    Decode(String),
    MissingStudentId,
    // The resolution deadline passed before the call answered.
    Timeout,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Transport(err) => write!(f, "edusign transport error: {err}"),
            RosterError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "edusign upstream error {status}: {message}")
                } else {
                    write!(f, "edusign upstream error {status}")
                }
            }
            RosterError::Decode(err) => write!(f, "edusign response decode error: {err}"),
            RosterError::MissingStudentId => write!(f, "student reference has no id"),
            RosterError::Timeout => write!(f, "roster resolution deadline exceeded"),
        }
    }
}

impl std::error::Error for RosterError {}

// Domain-level errors for the install/uninstall webhooks.
#[derive(Debug, PartialEq, Eq)]
pub enum CredentialError {
    MissingSchoolId,
    MissingToken,
    StorageFailure,
}
