//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use autoscroll::prelude::*;
//! ```

// Core
pub use crate::core::config::{Config, Overrides};
pub use crate::core::errors::{ErrorCategory, Result, ScrollError};

// Logging
pub use crate::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};

// Viewer
pub use crate::viewer::engine::{Event, ExitReason, Outcome, RunState, ViewState, Viewer};
#[cfg(unix)]
pub use crate::viewer::events::SignalEvents;
pub use crate::viewer::events::{EventSource, ScriptedEvents};
pub use crate::viewer::layout::{Frame, Geometry, layout};
pub use crate::viewer::render::Renderer;
pub use crate::viewer::run_viewer;
pub use crate::viewer::store::{Line, LineStore};
