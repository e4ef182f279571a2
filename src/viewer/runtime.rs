//! The run loop: wait for an event, update the engine, draw, re-arm.

use std::io::Write;

use crate::core::errors::Result;
use crate::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};
use crate::viewer::engine::{Event, ExitReason, Outcome, Viewer};
use crate::viewer::events::EventSource;
use crate::viewer::render::Renderer;

/// Drive `viewer` until it exits.
///
/// Returns the reason for a clean exit. Any error is fatal; the screen is
/// left as it was.
pub fn run_viewer<S, W>(
    viewer: &mut Viewer,
    events: &mut S,
    renderer: &mut Renderer<W>,
    log: &mut JsonlWriter,
) -> Result<ExitReason>
where
    S: EventSource,
    W: Write,
{
    log.write_entry(&start_entry(viewer));
    events.bootstrap()?;

    loop {
        let event = events.next_event()?;
        match event {
            Event::Pause => log.write_entry(&view_entry(EventType::Pause, viewer)),
            Event::Resume => log.write_entry(&view_entry(EventType::Resume, viewer)),
            Event::Resize(geometry) => {
                renderer.set_geometry(geometry);
                let mut entry = view_entry(EventType::Resize, viewer);
                entry.rows = Some(geometry.rows);
                entry.cols = Some(geometry.cols);
                log.write_entry(&entry);
            }
            Event::Tick | Event::Terminate { .. } => {}
        }

        match viewer.handle(event) {
            Outcome::Idle => {}
            Outcome::Redraw { scrolled } => {
                let latched = viewer.control().display_and_exit;
                viewer.compose();
                if scrolled {
                    log.write_entry(&view_entry(EventType::Scroll, viewer));
                }
                if !latched && viewer.control().display_and_exit {
                    log.write_entry(&view_entry(EventType::DisplayAndExit, viewer));
                }

                match renderer.draw(viewer.visible_lines(), viewer.view()) {
                    Ok(()) => {}
                    Err(err) if err.is_broken_pipe() => {
                        return Ok(finish(ExitReason::OutputClosed, viewer, log));
                    }
                    Err(err) => return Err(err),
                }
                events.arm_tick()?;
            }
            Outcome::Exit(reason) => {
                match renderer.clear() {
                    Err(err) if !err.is_broken_pipe() => return Err(err),
                    _ => {}
                }
                return Ok(finish(reason, viewer, log));
            }
        }
    }
}

fn finish(reason: ExitReason, viewer: &Viewer, log: &mut JsonlWriter) -> ExitReason {
    let mut entry = view_entry(EventType::ViewerStop, viewer);
    match reason {
        ExitReason::Exhausted => entry.details = Some("exhausted".to_string()),
        ExitReason::DisplayedWhole => entry.details = Some("displayed_whole".to_string()),
        ExitReason::OutputClosed => entry.details = Some("output_closed".to_string()),
        ExitReason::Signal(signal) => {
            entry.details = Some("signal".to_string());
            entry.signal = Some(signal.to_string());
        }
    }
    log.write_entry(&entry);
    reason
}

fn start_entry(viewer: &Viewer) -> LogEntry {
    let mut entry = LogEntry::new(EventType::ViewerStart, Severity::Info);
    let geometry = viewer.geometry();
    entry.rows = Some(geometry.rows);
    entry.cols = Some(geometry.cols);
    entry.interval_secs = Some(viewer.interval());
    entry.remaining = Some(viewer.remaining());
    entry
}

fn view_entry(event: EventType, viewer: &Viewer) -> LogEntry {
    let mut entry = LogEntry::new(event, Severity::Info);
    let view = viewer.view();
    entry.first_line = Some(view.first_line);
    entry.last_line = Some(view.last_line());
    entry.remaining = Some(viewer.remaining());
    entry
}
