//! # helplined — helpline directory
//!
//! Composition root that wires all adapters together and runs the
//! interactive directory in the terminal.
//!
//! ## Responsibilities
//! - Load configuration (`helpline.toml`, env vars)
//! - Initialise `tracing` on stderr so the screen on stdout stays clean
//! - Open the JSON state file
//! - Pick the clipboard mechanisms (configured or detected program, OSC 52
//!   fallback)
//! - Start the session and feed it the commands typed at the prompt
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod command;
mod config;

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use helpline_adapter_storage_file::Config as StorageConfig;
use helpline_adapter_terminal::{
    CommandClipboard, DirectoryLocator, Osc52Clipboard, TerminalPrompt, TerminalView,
};
use helpline_app::clipboard::FallbackClipboard;
use helpline_app::ports::{Clipboard, KeyValueStore};
use helpline_app::session::Session;
use helpline_domain::error::HelplineError;

use crate::command::{Command, HELP};
use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    let cards = config.cards()?;
    let store = StorageConfig {
        path: config.storage.path.clone(),
    }
    .build()
    .with_context(|| format!("failed to open {}", config.storage.path.display()))?;

    let primary = match &config.clipboard.command {
        Some(line) => Some(CommandClipboard::parse(line).context("invalid clipboard command")?),
        None => CommandClipboard::detect(),
    };
    let fallback = config.clipboard.osc52_fallback.then(Osc52Clipboard::stdout);
    let clipboard = FallbackClipboard::new(primary, fallback);

    let prompt = Arc::new(TerminalPrompt::stdio());
    let view = Arc::new(TerminalView::new(config.directory.title.clone(), cards.clone()));
    let session = Session::start(
        store,
        Arc::clone(&prompt),
        clipboard,
        Arc::clone(&view),
        &DirectoryLocator::new(cards),
    );
    tracing::info!(state = %config.storage.path.display(), "helplined ready");

    run(&session, &prompt, &view).await?;
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), using \"info\"");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Redraw, read a command, act on it, until `quit` or end of input.
async fn run<S, C, R, W>(
    session: &Session<S, Arc<TerminalPrompt<R, W>>, C, TerminalView>,
    prompt: &TerminalPrompt<R, W>,
    view: &TerminalView,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    C: Clipboard,
    R: BufRead,
    W: Write,
{
    loop {
        // Let expired notice and indicator timers run before drawing.
        tokio::task::yield_now().await;
        prompt.print(&view.render())?;

        let Some(line) = prompt.read_command("helpline> ")? else {
            break;
        };
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Redraw => {}
            Command::Help => prompt.print(HELP)?,
            Command::Press(element) => match session.activate(&element).await {
                Ok(outcome) => tracing::debug!(%element, ?outcome, "command handled"),
                Err(HelplineError::NotFound(err)) => {
                    prompt.print(&format!("{err}, type `help` for the list of commands\n"))?;
                }
                Err(err) => return Err(err.into()),
            },
        }
    }
    tracing::info!("helplined stopped");
    Ok(())
}
