//! Full-screen renderer: page body plus a one-line status bar.
//!
//! Output goes through crossterm commands. The clear sequence and the status
//! cursor positioning use the plain VT100 forms (`ESC[H`, `ESC[<r>;1f`) so the
//! byte stream matches what classic terminals and recordings expect.

#![allow(missing_docs)]

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use chrono::NaiveTime;
use crossterm::Command;
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::core::errors::{Result, ScrollError};
use crate::viewer::engine::ViewState;
use crate::viewer::layout::Geometry;
use crate::viewer::store::Line;

/// `ESC[H`: cursor to the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorHome;

impl Command for CursorHome {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[H")
    }
}

/// `ESC[<row>;1f`: cursor to column 1 of a 1-based row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToRowStart(pub u16);

impl Command for MoveToRowStart {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[{};1f", self.0)
    }
}

/// Source of the wall-clock time shown in the status bar.
pub type Clock = Box<dyn Fn() -> NaiveTime>;

fn local_clock() -> NaiveTime {
    chrono::Local::now().time()
}

/// Status bar text: `HH:MM:SS Lines: <first>-<last>`.
pub fn status_text(now: NaiveTime, view: &ViewState) -> Result<String> {
    let mut text = String::with_capacity(32);
    write!(
        text,
        "{} Lines: {}-{}",
        now.format("%H:%M:%S"),
        view.first_line,
        view.last_line()
    )
    .map_err(|_| ScrollError::render("clock", io::Error::other("failed to format time string")))?;
    Ok(text)
}

/// Writes frames to a terminal (or any writer).
pub struct Renderer<W: Write> {
    out: W,
    geometry: Geometry,
    clock: Clock,
}

impl<W: Write> Renderer<W> {
    /// Renderer using the local wall clock.
    pub fn new(out: W, geometry: Geometry) -> Self {
        Self {
            out,
            geometry,
            clock: Box::new(local_clock),
        }
    }

    /// Replace the clock, e.g. with a fixed time for reproducible output.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Wipe the screen and scrollback, cursor home.
    pub fn clear(&mut self) -> Result<()> {
        queue!(
            self.out,
            Clear(ClearType::All),
            Clear(ClearType::Purge),
            CursorHome
        )
        .and_then(|()| self.out.flush())
        .map_err(|source| ScrollError::render("clear", source))
    }

    /// Draw one frame: clear, body lines verbatim, then the status bar.
    ///
    /// Each phase is flushed before the next starts.
    pub fn draw<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a Line>,
        view: &ViewState,
    ) -> Result<()> {
        self.clear()?;

        for line in lines {
            self.out
                .write_all(line.as_bytes())
                .map_err(|source| ScrollError::render("body", source))?;
        }
        self.out
            .flush()
            .map_err(|source| ScrollError::render("body", source))?;

        let status = status_text((self.clock)(), view)?;
        queue!(self.out, MoveToRowStart(self.geometry.rows))
            .and_then(|()| self.out.write_all(status.as_bytes()))
            .and_then(|()| queue!(self.out, MoveToColumn(self.geometry.cols - 3)))
            .and_then(|()| self.out.flush())
            .map_err(|source| ScrollError::render("status", source))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
