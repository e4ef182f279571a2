#![forbid(unsafe_code)]

//! autoscroll: display a text file on the terminal, scrolling one line per
//! interval.
//!
//! The viewer is a single-threaded event loop:
//! 1. **Line store**: the file's lines, drained from the front as the view scrolls
//! 2. **Pagination**: how many whole (soft-wrapped) lines fit above the status bar
//! 3. **Engine**: tick/pause/resume/terminate state machine with a countdown
//! 4. **Renderer**: clear, page body, `HH:MM:SS Lines: a-b` status bar
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use autoscroll::prelude::*;
//! ```
//!
//! A session can be driven by any [`viewer::events::EventSource`]; the
//! scripted source renders into memory without a terminal:
//!
//! ```rust
//! use autoscroll::prelude::*;
//!
//! let store = LineStore::from_bytes(b"one\ntwo\n");
//! let geometry = Geometry::new(10, 80).unwrap();
//! let mut viewer = Viewer::new(store, geometry, 1);
//! let mut events = ScriptedEvents::ticks(1);
//! let mut renderer = Renderer::new(Vec::new(), geometry);
//! let mut log = JsonlWriter::disabled();
//!
//! let reason = run_viewer(&mut viewer, &mut events, &mut renderer, &mut log).unwrap();
//! assert_eq!(reason, ExitReason::DisplayedWhole);
//! ```

pub mod prelude;

pub mod core;
pub mod logger;
pub mod viewer;
