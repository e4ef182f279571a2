//! Line store: the file's lines, in order, drained from the front as the
//! view scrolls.
//!
//! Lines keep their trailing `\n` so the renderer can print them verbatim and
//! the pagination engine can tell an empty line from a final unterminated one.

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use unicode_width::UnicodeWidthChar;

use crate::core::errors::{Result, ScrollError};

/// Columns between hardware tab stops.
pub const TAB_STOP: usize = 8;

/// One line of the input file, raw bytes including its newline terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    content: Vec<u8>,
}

impl Line {
    /// Wrap raw bytes as a line.
    #[must_use]
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Raw bytes, newline included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Length in bytes, newline included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the line holds no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the line ends with `\n` (false only for a final unterminated line).
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.content.last() == Some(&b'\n')
    }

    /// The line without its `\n` (or `\r\n`) terminator.
    #[must_use]
    pub fn text(&self) -> &[u8] {
        let body = self.content.strip_suffix(b"\n").unwrap_or(&self.content);
        body.strip_suffix(b"\r").unwrap_or(body)
    }

    /// Number of terminal columns the line's text occupies before wrapping.
    ///
    /// Wide characters count two columns, tabs run to the next multiple of
    /// [`TAB_STOP`], control characters count zero, and each byte of an
    /// invalid UTF-8 sequence counts one.
    #[must_use]
    pub fn visible_width(&self) -> usize {
        let mut width = 0;
        self.for_each_cell(|cell| width += cell);
        width
    }

    /// Feed the width of every printed cell, in order, to `place`.
    ///
    /// Tabs are expanded into single-column cells so callers that wrap at a
    /// column limit see where the padding breaks.
    pub fn for_each_cell(&self, mut place: impl FnMut(usize)) {
        let mut column = 0;
        for chunk in self.text().utf8_chunks() {
            for ch in chunk.valid().chars() {
                if ch == '\t' {
                    let pad = TAB_STOP - column % TAB_STOP;
                    (0..pad).for_each(|_| place(1));
                    column += pad;
                    continue;
                }
                let width = ch.width().unwrap_or(0);
                if width > 0 {
                    place(width);
                    column += width;
                }
            }
            for _ in chunk.invalid() {
                place(1);
                column += 1;
            }
        }
    }
}

/// Ordered lines of one file. Popped lines are gone for good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: VecDeque<Line>,
}

impl LineStore {
    /// Read `path` to EOF and split it into lines.
    ///
    /// The file handle is released before this returns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| ScrollError::io(path, source))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|source| ScrollError::io(path, source))?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Split in-memory content into lines, each keeping its `\n`.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut lines = VecDeque::new();
        let mut start = 0;
        for newline in memchr::memchr_iter(b'\n', bytes) {
            lines.push_back(Line::new(&bytes[start..=newline]));
            start = newline + 1;
        }
        if start < bytes.len() {
            lines.push_back(Line::new(&bytes[start..]));
        }
        Self { lines }
    }

    /// First remaining line.
    #[must_use]
    pub fn peek_front(&self) -> Option<&Line> {
        self.lines.front()
    }

    /// Remove and return the first line. `None` when already empty.
    pub fn pop_front(&mut self) -> Option<Line> {
        self.lines.pop_front()
    }

    /// Remaining line count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remaining lines, front first.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }
}
