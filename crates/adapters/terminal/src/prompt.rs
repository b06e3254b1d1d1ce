//! Line-based confirm/alert prompt.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use helpline_app::ports::UserPrompt;

use crate::error::TerminalError;

struct Terminal<R, W> {
    input: R,
    output: W,
}

/// Reads answers from `R` and writes questions to `W`.
///
/// The same reader also serves the command loop through
/// [`read_command`](Self::read_command), so there is only one consumer of
/// the input stream.
pub struct TerminalPrompt<R, W> {
    terminal: Mutex<Terminal<R, W>>,
}

impl TerminalPrompt<BufReader<Stdin>, Stdout> {
    /// Prompt on the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            terminal: Mutex::new(Terminal { input, output }),
        }
    }

    fn terminal(&self) -> MutexGuard<'_, Terminal<R, W>> {
        self.terminal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Io`] if writing the prompt or reading fails.
    pub fn read_command(&self, prompt: &str) -> Result<Option<String>, TerminalError> {
        let mut terminal = self.terminal();
        write!(terminal.output, "{prompt}")?;
        terminal.output.flush()?;
        terminal.read_line()
    }

    /// Write raw text to the output, e.g. a rendered screen.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Io`] if the write fails.
    pub fn print(&self, text: &str) -> Result<(), TerminalError> {
        let mut terminal = self.terminal();
        terminal.output.write_all(text.as_bytes())?;
        terminal.output.flush()?;
        Ok(())
    }

    /// Give back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        let terminal = self
            .terminal
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        (terminal.input, terminal.output)
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    fn read_line(&mut self) -> Result<Option<String>, TerminalError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

impl<R: BufRead, W: Write> UserPrompt for TerminalPrompt<R, W> {
    fn confirm(&self, message: &str) -> bool {
        let mut terminal = self.terminal();
        let answer = writeln!(terminal.output, "{message}")
            .and_then(|()| write!(terminal.output, "[y/N] "))
            .and_then(|()| terminal.output.flush())
            .map_err(TerminalError::from)
            .and_then(|()| terminal.read_line());
        match answer {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => {
                tracing::debug!("input closed while confirming, treating as cancel");
                false
            }
            Err(err) => {
                tracing::warn!(%err, "failed to read confirmation, treating as cancel");
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        let mut terminal = self.terminal();
        let acknowledged = writeln!(terminal.output, "! {message}")
            .and_then(|()| write!(terminal.output, "(press Enter) "))
            .and_then(|()| terminal.output.flush())
            .map_err(TerminalError::from)
            .and_then(|()| terminal.read_line());
        if let Err(err) = acknowledged {
            tracing::warn!(%err, "failed to show alert");
        }
    }
}
