//! JSONL event log: append-only line-delimited JSON describing a viewing
//! session.
//!
//! The terminal belongs to the viewer while it runs, so nothing is ever
//! written to stderr from here. Each line is assembled in memory and written
//! with a single `write_all`, then flushed so the file can be tailed live.
//!
//! Two-level degradation:
//! 1. Configured file path
//! 2. Silent discard (the viewer must never stop for logging failures)

#![allow(missing_docs)]

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Severity level for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Session event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ViewerStart,
    Scroll,
    Pause,
    Resume,
    Resize,
    DisplayAndExit,
    ViewerStop,
    Error,
}

/// A single JSONL log entry. Only `ts`, `event` and `severity` are always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    pub event: EventType,
    pub severity: Severity,
    /// File being viewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// First line number on screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_line: Option<usize>,
    /// Last line number on screen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_line: Option<usize>,
    /// Lines still held in memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<u16>,
    /// Signal that caused the event, e.g. `SIGQUIT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    /// ASC error code if the session failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Freeform details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(event: EventType, severity: Severity) -> Self {
        Self {
            ts: format_utc_now(),
            event,
            severity,
            path: None,
            first_line: None,
            last_line: None,
            remaining: None,
            interval_secs: None,
            rows: None,
            cols: None,
            signal: None,
            error_code: None,
            details: None,
        }
    }
}

/// Degradation state of the JSONL writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Normal,
    Discard,
}

/// Append-only JSONL writer that degrades to discarding on any failure.
pub struct JsonlWriter {
    path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
    state: WriterState,
    lines_written: u64,
}

impl JsonlWriter {
    /// Open (creating parent directories as needed) the log at `path`.
    /// Falls back to discarding if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let (writer, state) = match open_append(&path) {
            Ok(file) => (Some(BufWriter::new(file)), WriterState::Normal),
            Err(_) => (None, WriterState::Discard),
        };
        Self {
            path: Some(path),
            writer,
            state,
            lines_written: 0,
        }
    }

    /// A writer that drops every entry.
    pub fn disabled() -> Self {
        Self {
            path: None,
            writer: None,
            state: WriterState::Discard,
            lines_written: 0,
        }
    }

    /// Open `path` when configured, otherwise a disabled writer.
    pub fn from_config(path: Option<&Path>) -> Self {
        path.map_or_else(Self::disabled, Self::open)
    }

    /// Write a single log entry as one JSONL line.
    pub fn write_entry(&mut self, entry: &LogEntry) {
        if self.state == WriterState::Discard {
            return;
        }
        let Ok(json) = serde_json::to_string(entry) else {
            return;
        };
        let line = format!("{json}\n");

        let ok = self
            .writer
            .as_mut()
            .is_some_and(|w| w.write_all(line.as_bytes()).and_then(|()| w.flush()).is_ok());
        if ok {
            self.lines_written += 1;
        } else {
            self.degrade();
        }
    }

    /// Current degradation state.
    pub fn state(&self) -> &str {
        match self.state {
            WriterState::Normal => "normal",
            WriterState::Discard => "discard",
        }
    }

    /// Destination path, if one was configured.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Entries successfully written.
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn degrade(&mut self) {
        self.writer = None;
        self.state = WriterState::Discard;
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// RFC 3339 UTC timestamp with millisecond precision.
pub fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
