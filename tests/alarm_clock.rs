//! Real `alarm(1)` ticks through the signal-driven event source.
//!
//! Built with `harness = false`: SIGALRM is directed at the whole process,
//! so the main thread must be the only thread and must hold the mask.

#[cfg(unix)]
fn main() {
    use std::time::{Duration, Instant};

    use autoscroll::prelude::*;
    use chrono::NaiveTime;

    let geometry = Geometry::new(10, 80).expect("geometry");
    let store = LineStore::from_bytes(b"alpha\nbeta\ngamma\n");
    let mut viewer = Viewer::new(store, geometry, 1);
    let mut events = SignalEvents::install(false).expect("install mask");
    let mut renderer = Renderer::new(Vec::new(), geometry)
        .with_clock(|| NaiveTime::from_hms_opt(6, 30, 0).expect("time"));
    let mut log = JsonlWriter::disabled();

    let started = Instant::now();
    let reason =
        run_viewer(&mut viewer, &mut events, &mut renderer, &mut log).expect("session runs");
    let elapsed = started.elapsed();

    assert_eq!(reason, ExitReason::DisplayedWhole);
    assert!(
        elapsed >= Duration::from_millis(500),
        "exit should wait for one alarm tick, took {elapsed:?}"
    );
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");

    let output = String::from_utf8(renderer.into_inner()).expect("utf8");
    assert_eq!(output.matches("06:30:00 Lines: 1-3").count(), 1);
    assert!(output.ends_with("\x1b[2J\x1b[3J\x1b[H"));

    println!("alarm_clock: ok ({elapsed:?})");
}

#[cfg(not(unix))]
fn main() {}
