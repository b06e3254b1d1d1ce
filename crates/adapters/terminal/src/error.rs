//! Terminal adapter error type.

use std::process::ExitStatus;

use helpline_domain::error::ClipboardError;

/// Errors raised while talking to the terminal or a clipboard program.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("terminal IO error")]
    Io(#[from] std::io::Error),

    /// A clipboard command line was configured but contains no program.
    #[error("clipboard command is empty")]
    EmptyCommand,

    /// The clipboard program ran but reported failure.
    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: ExitStatus },
}

impl TerminalError {
    /// Report this error as the failure of clipboard `mechanism`.
    #[must_use]
    pub fn into_clipboard(self, mechanism: &'static str) -> ClipboardError {
        let reason = match &self {
            Self::Io(err) => format!("{self}: {err}"),
            _ => self.to_string(),
        };
        ClipboardError::Mechanism { mechanism, reason }
    }
}
