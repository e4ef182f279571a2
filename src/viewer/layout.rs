//! Pagination: how many whole lines fit above the status bar.
//!
//! Long lines soft-wrap across several physical rows. A line that does not
//! fit entirely in the rows left is deferred to a later frame, never clipped,
//! so the last body rows may stay blank.

use crate::core::errors::{Result, ScrollError};
use crate::viewer::store::{Line, LineStore};

/// Rows reserved at the bottom of the screen for the status bar.
pub const STATUS_ROWS: u16 = 1;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub rows: u16,
    pub cols: u16,
}

impl Geometry {
    /// Validate raw dimensions. At least one body row, the status row, and
    /// three columns (the cursor parks two columns from the right edge) are
    /// required.
    pub fn new(rows: u16, cols: u16) -> Result<Self> {
        if rows <= STATUS_ROWS || cols < 3 {
            return Err(ScrollError::TerminalTooSmall { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Sample the controlling terminal.
    pub fn sample() -> Result<Self> {
        let (cols, rows) =
            crossterm::terminal::size().map_err(|source| ScrollError::Geometry { source })?;
        Self::new(rows, cols)
    }

    /// Rows available for file content.
    #[must_use]
    pub const fn body_rows(&self) -> usize {
        (self.rows - STATUS_ROWS) as usize
    }
}

/// Physical rows one line occupies at `cols` columns. Never less than 1.
///
/// A wide character that would straddle the right margin moves whole to the
/// next row, as terminals do.
#[must_use]
pub fn rows_needed(line: &Line, cols: u16) -> usize {
    let cols = usize::from(cols.max(1));
    let mut rows = 1;
    let mut column = 0;
    line.for_each_cell(|width| {
        if column > 0 && column + width > cols {
            rows += 1;
            column = 0;
        }
        column += width;
    });
    rows
}

/// Result of laying out one screenful starting at the store's head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    /// File lines that fit, counted from the head.
    pub line_count: usize,
    /// Physical rows those lines consume.
    pub rows_used: usize,
    /// Every remaining line fit in this frame.
    pub reaches_end: bool,
}

/// Lay out the lines at the head of `store` for `geometry`.
#[must_use]
pub fn layout(store: &LineStore, geometry: Geometry) -> Frame {
    let budget = geometry.body_rows();
    let mut frame = Frame::default();

    for line in store.iter() {
        let needed = rows_needed(line, geometry.cols);
        if frame.rows_used + needed > budget {
            return frame;
        }
        frame.rows_used += needed;
        frame.line_count += 1;
    }

    frame.reaches_end = true;
    frame
}
