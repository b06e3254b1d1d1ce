//! Clipboard mechanisms for a terminal session.
//!
//! [`CommandClipboard`] pipes the text into a clipboard program such as
//! `wl-copy`. [`Osc52Clipboard`] asks the terminal emulator itself to set
//! the clipboard, which also works over SSH.

use std::ffi::OsString;
use std::future::Future;
use std::io::{self, Stdout, Write};
use std::process::Stdio;
use std::sync::{Mutex, PoisonError};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use helpline_app::ports::Clipboard;
use helpline_domain::error::HelplineError;

use crate::error::TerminalError;

const COMMAND_MECHANISM: &str = "command";
const OSC52_MECHANISM: &str = "osc52";

/// Writes the clipboard by running a program with the text on its stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a whitespace-separated command line such as
    /// `"xclip -selection clipboard"`.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::EmptyCommand`] if `line` has no program.
    pub fn parse(line: &str) -> Result<Self, TerminalError> {
        let mut words = line.split_whitespace();
        let program = words.next().ok_or(TerminalError::EmptyCommand)?;
        Ok(Self::new(program, words))
    }

    /// Pick a clipboard program for the current session, if one is installed.
    #[must_use]
    pub fn detect() -> Option<Self> {
        Self::detect_with(|name| std::env::var_os(name), is_on_path)
    }

    fn detect_with(
        env: impl Fn(&str) -> Option<OsString>,
        installed: impl Fn(&str) -> bool,
    ) -> Option<Self> {
        let mut candidates: Vec<(&str, &[&str])> = Vec::new();
        if env("WAYLAND_DISPLAY").is_some() {
            candidates.push(("wl-copy", &[]));
        }
        if env("DISPLAY").is_some() {
            candidates.push(("xclip", &["-selection", "clipboard"]));
            candidates.push(("xsel", &["--clipboard", "--input"]));
        }
        if cfg!(target_os = "macos") {
            candidates.push(("pbcopy", &[]));
        }

        let found = candidates
            .into_iter()
            .find(|(program, _)| installed(program))
            .map(|(program, args)| Self::new(program, args.iter().copied()));
        match &found {
            Some(clipboard) => tracing::debug!(program = %clipboard.program, "clipboard program detected"),
            None => tracing::debug!("no clipboard program detected"),
        }
        found
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, text: &str) -> Result<(), TerminalError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(TerminalError::CommandFailed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

fn is_on_path(program: &str) -> bool {
    std::env::var_os("PATH").is_some_and(|paths| {
        std::env::split_paths(&paths).any(|dir| dir.join(program).is_file())
    })
}

impl Clipboard for CommandClipboard {
    fn mechanism(&self) -> &'static str {
        COMMAND_MECHANISM
    }

    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), HelplineError>> + Send {
        async move {
            self.run(text).await.map_err(|err| {
                tracing::debug!(%err, program = %self.program, "clipboard program failed");
                HelplineError::from(err.into_clipboard(COMMAND_MECHANISM))
            })
        }
    }
}

/// Sets the clipboard through the OSC 52 terminal escape sequence.
///
/// Terminals that do not support OSC 52 silently ignore the sequence, so a
/// successful write only means the sequence reached the terminal.
pub struct Osc52Clipboard<W> {
    output: Mutex<W>,
}

impl Osc52Clipboard<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
        }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.output.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, text: &str) -> Result<(), TerminalError> {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        write!(output, "\x1b]52;c;{}\x07", BASE64.encode(text))?;
        output.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn mechanism(&self) -> &'static str {
        OSC52_MECHANISM
    }

    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), HelplineError>> + Send {
        let result = self
            .emit(text)
            .map_err(|err| HelplineError::from(err.into_clipboard(OSC52_MECHANISM)));
        async { result }
    }
}
