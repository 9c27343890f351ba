//! # dl-app
//!
//! Terminal screen for Days Left.
//!
//! Shows how many days are left until the configured target date and the
//! goal list grouped by creation date. Typing `add <text>` or `done <n>` at
//! the prompt forwards the intent to the goal store; everything is saved
//! automatically.
//!
//! ## Usage
//!
//! ```text
//! daysleft [--data-dir <dir>]
//! ```
//!
//! Settings are read from `<data-dir>/config.toml` when present.

mod screen;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use dl_countdown::Countdown;
use dl_goal::{AppConfig, Clock, DataPaths, FileKeyValueStore, GoalStore, StoreOptions, SystemClock};

use crate::screen::{Intent, HELP};

/// Days Left: count down to a date and track your goals until then.
#[derive(Parser)]
#[command(name = "daysleft", version, about)]
struct Cli {
    /// Data directory (defaults to the platform data dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't garble the screen on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("dl_goal=info".parse()?)
                .add_directive("dl_app=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let paths = DataPaths::for_data_dir(resolve_data_dir(cli.data_dir));
    tracing::info!("Data directory: {}", paths.data_dir.display());

    let config = load_config(&paths)?;
    let countdown = config.countdown()?;

    let backend = Arc::new(FileKeyValueStore::new(&paths.store_dir)?);
    let clock = Arc::new(SystemClock);
    let mut store =
        GoalStore::open_with_clock(backend, StoreOptions::from(&config), clock.clone()).await?;

    let screen = run_screen(&mut store, &countdown, clock.as_ref());
    finish(store, screen).await
}

/// Settings from `config.toml`, or the defaults when there is none.
///
/// A file that exists but is invalid is an error rather than silently ignored.
fn load_config(paths: &DataPaths) -> Result<AppConfig> {
    if !paths.config_file.exists() {
        return Ok(AppConfig::default());
    }
    AppConfig::load(&paths.config_file)
        .with_context(|| format!("invalid config {}", paths.config_file.display()))
}

/// Save pending changes, then report how the screen ended.
async fn finish(store: GoalStore, screen: Result<()>) -> Result<()> {
    if let Err(e) = store.close().await {
        // The last changes may be lost.
        tracing::warn!("could not save goals: {}", e);
    }
    screen
}

/// `--data-dir`, else `<platform data dir>/daysleft`, else `./.daysleft`.
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| dirs::data_dir().map(|d| d.join("daysleft")))
        .unwrap_or_else(|| PathBuf::from(".daysleft"))
}

/// Draw, read one line, apply it, repeat.
fn run_screen(store: &mut GoalStore, countdown: &Countdown, clock: &dyn Clock) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut redraw = true;

    loop {
        if redraw {
            let days_left = countdown.days_left(clock.now());
            print!("{}", screen::render(days_left, &store.display_rows()));
        }
        redraw = true;

        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            if let Err(e) = editor.add_history_entry(line.as_str()) {
                tracing::debug!("could not record history: {}", e);
            }
        }

        match Intent::parse(&line) {
            Intent::Add(text) => {
                if store.add(&text).is_none() {
                    println!("Nothing to add.");
                    redraw = false;
                }
            }
            Intent::Toggle(number) => {
                let id = store.goals().get(number - 1).map(|g| g.id.clone());
                match id {
                    Some(id) => {
                        store.toggle_completion(&id);
                    }
                    None => {
                        println!("No goal number {}.", number);
                        redraw = false;
                    }
                }
            }
            Intent::Refresh => {}
            Intent::Help => {
                println!("{}", HELP);
                redraw = false;
            }
            Intent::Quit => break,
            Intent::Unknown(input) => {
                println!("Unknown command: {} (try `help`)", input);
                redraw = false;
            }
        }
    }
    Ok(())
}
