//! Command-line definition and session setup.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;

use autoscroll::core::config::{Config, INTERVAL_RANGE, Overrides};
use autoscroll::core::errors::{Result, ScrollError};
use autoscroll::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};
use autoscroll::viewer::engine::{ExitReason, Viewer};
use autoscroll::viewer::events::SignalEvents;
use autoscroll::viewer::layout::Geometry;
use autoscroll::viewer::render::Renderer;
use autoscroll::viewer::run_viewer;
use autoscroll::viewer::store::LineStore;

/// Display a text file, scrolling one line every interval.
///
/// CTRL-Z pauses scrolling (the clock keeps running), CTRL-C resumes it,
/// CTRL-\ or any terminating signal clears the screen and exits.
#[derive(Debug, Parser)]
#[command(name = "autoscroll", version, about, long_about = None)]
pub struct Cli {
    /// Seconds between scroll steps, a positive integer less than 60.
    #[arg(
        short = 's',
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u8).range(
            i64::from(*INTERVAL_RANGE.start())..=i64::from(*INTERVAL_RANGE.end())
        )
    )]
    seconds: Option<u8>,
    /// Override config file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Append session events as JSON lines to this file.
    #[arg(long = "log", value_name = "PATH")]
    log: Option<PathBuf>,
    /// Text file to display.
    #[arg(value_name = "TEXTFILE")]
    path: PathBuf,
}

/// Run one viewing session.
pub fn run(cli: &Cli) -> Result<ExitReason> {
    let config = Config::load_with_overrides(
        cli.config.as_deref(),
        &Overrides {
            interval_secs: cli.seconds,
            jsonl_path: cli.log.clone(),
        },
    )?;

    if !io::stdin().is_terminal() {
        return Err(ScrollError::NotATerminal);
    }

    let mut events = SignalEvents::install(config.terminal.resample_on_resize)?;
    let mut log = JsonlWriter::from_config(config.log.jsonl_path.as_deref());

    let result = start_session(cli, &config, &mut events, &mut log);
    if let Err(err) = &result {
        let mut entry = LogEntry::new(EventType::Error, Severity::Critical);
        entry.path = Some(cli.path.display().to_string());
        entry.error_code = Some(err.code().to_string());
        entry.details = Some(err.to_string());
        log.write_entry(&entry);
    }
    result
}

fn start_session(
    cli: &Cli,
    config: &Config,
    events: &mut SignalEvents,
    log: &mut JsonlWriter,
) -> Result<ExitReason> {
    let store = LineStore::load(&cli.path)?;
    let geometry = Geometry::sample()?;

    let mut viewer = Viewer::new(store, geometry, config.scroll.interval_secs);
    let mut renderer = Renderer::new(io::stdout(), geometry);
    run_viewer(&mut viewer, events, &mut renderer, log)
}
