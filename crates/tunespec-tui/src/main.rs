#![deny(unsafe_code)]

//! tunespec TUI: live control surface for a spec document.

mod app;
mod keymap;
mod panels;
mod readout;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tunespec_config::AppConfig;
use tunespec_core::{DirectoryResolver, LogCollector, TunableSpec};

use crate::app::App;

const LOG_CAPACITY: usize = 1000;

/// Tune a spec's sliders and switches live, then export the result.
#[derive(Parser)]
#[command(name = "tunespec-tui", version, about, long_about = None)]
struct Args {
    /// Spec name (resolved as `<resources>/<name>.json`).
    name: String,

    /// Path to configuration file.
    #[arg(short, long, default_value = "tunespec.toml")]
    config: PathBuf,

    /// Directory holding spec documents (overrides `resources.dir`).
    #[arg(short, long)]
    resources: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load_or_default(&args.config)
        .await
        .with_context(|| format!("loading {}", args.config.display()))?;

    // Events go to the Logs panel; writing to stdout would corrupt the screen.
    let collector = LogCollector::new(LOG_CAPACITY);
    let log_reader = collector.reader();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(collector)
        .init();

    let resources = args
        .resources
        .unwrap_or_else(|| config.resources.dir.clone());
    let resolver = DirectoryResolver::new(&resources);
    let spec = TunableSpec::load(&args.name, &resolver).with_context(|| {
        format!(
            "failed to load spec {:?} from {}",
            args.name,
            resources.display()
        )
    })?;

    let mut app = App::new(spec, config, log_reader)?;
    info!(spec = %args.name, "Starting tunespec TUI");

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        app.tick();
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = app.keymap.resolve(key.code);
                    app.handle_action(action);
                }
            }
        }
    }
    Ok(())
}
