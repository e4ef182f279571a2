//! Scroll state machine.
//!
//! [`Viewer`] owns the line store, the geometry, the view state and the run
//! control flags. It reacts to one [`Event`] at a time and tells the caller
//! whether to redraw, do nothing, or exit. It never touches the terminal, so
//! every timing rule can be exercised without one.

#![allow(missing_docs)]

use crate::viewer::layout::{self, Frame, Geometry};
use crate::viewer::store::{Line, LineStore};

/// Tagged input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// One-second alarm. The first one is the synthetic bootstrap tick.
    Tick,
    /// Stop scrolling (the clock keeps running).
    Pause,
    /// Resume scrolling.
    Resume,
    /// Terminal size changed; carries the new sample.
    Resize(Geometry),
    /// A terminating signal arrived.
    Terminate { signal: &'static str },
}

/// Coarse lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Terminating,
}

/// Why the viewer stopped. All of these are successful exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The last line scrolled off.
    Exhausted,
    /// The whole file fit on the first screen and its display time ran out.
    DisplayedWhole,
    /// A terminating signal.
    Signal(&'static str),
    /// The terminal went away while drawing.
    OutputClosed,
}

/// What the caller should do after handing an event to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Compose and draw a frame, then re-arm the tick.
    Redraw { scrolled: bool },
    /// Nothing visible changed.
    Idle,
    /// Clear the screen and stop.
    Exit(ExitReason),
}

/// What is on screen and when the next scroll happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// 1-based file line number shown on the top row.
    pub first_line: usize,
    /// File lines in the current frame.
    pub lines_shown: usize,
    /// Physical rows those lines use.
    pub rows_used: usize,
    /// Seconds left until the next scroll.
    pub countdown: u8,
}

impl ViewState {
    /// Line number of the last line on screen. Equals `first_line` when the
    /// frame is empty.
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.first_line + self.lines_shown.saturating_sub(1)
    }
}

/// Process-lifetime control flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunControl {
    pub paused: bool,
    /// Latched when the first frame already held the whole file.
    pub display_and_exit: bool,
    /// Set once the bootstrap tick has been handled.
    pub bootstrapped: bool,
    pub terminating: bool,
}

/// The autoscroll engine.
#[derive(Debug, Clone)]
pub struct Viewer {
    store: LineStore,
    geometry: Geometry,
    interval: u8,
    view: ViewState,
    control: RunControl,
}

impl Viewer {
    /// Build a viewer over `store`, scrolling once every `interval` seconds.
    #[must_use]
    pub fn new(store: LineStore, geometry: Geometry, interval: u8) -> Self {
        let interval = interval.max(1);
        Self {
            store,
            geometry,
            interval,
            view: ViewState {
                first_line: 1,
                lines_shown: 0,
                rows_used: 0,
                countdown: interval,
            },
            control: RunControl::default(),
        }
    }

    /// Feed one event through the state machine.
    pub fn handle(&mut self, event: Event) -> Outcome {
        if self.control.terminating {
            return Outcome::Idle;
        }
        match event {
            Event::Tick => self.on_tick(),
            Event::Pause => {
                self.control.paused = true;
                Outcome::Idle
            }
            Event::Resume => {
                self.control.paused = false;
                Outcome::Idle
            }
            Event::Resize(geometry) => {
                self.geometry = geometry;
                Outcome::Idle
            }
            Event::Terminate { signal } => self.terminate(ExitReason::Signal(signal)),
        }
    }

    fn on_tick(&mut self) -> Outcome {
        if !self.control.bootstrapped {
            self.control.bootstrapped = true;
            return Outcome::Redraw { scrolled: false };
        }
        if self.control.paused {
            return Outcome::Redraw { scrolled: false };
        }

        self.view.countdown = self.view.countdown.saturating_sub(1);
        if self.view.countdown > 0 {
            return Outcome::Redraw { scrolled: false };
        }

        if self.control.display_and_exit {
            return self.terminate(ExitReason::DisplayedWhole);
        }

        self.store.pop_front();
        if self.store.is_empty() {
            return self.terminate(ExitReason::Exhausted);
        }
        self.view.first_line += 1;
        self.view.countdown = self.interval;
        Outcome::Redraw { scrolled: true }
    }

    fn terminate(&mut self, reason: ExitReason) -> Outcome {
        self.control.terminating = true;
        Outcome::Exit(reason)
    }

    /// Lay out the next frame and record it in the view state.
    ///
    /// Latches display-and-exit when the frame starting at line 1 holds every
    /// line of the file.
    pub fn compose(&mut self) -> Frame {
        let frame = layout::layout(&self.store, self.geometry);
        self.view.lines_shown = frame.line_count;
        self.view.rows_used = frame.rows_used;
        if frame.reaches_end && self.view.first_line == 1 {
            self.control.display_and_exit = true;
        }
        frame
    }

    /// Lines of the most recently composed frame.
    pub fn visible_lines(&self) -> impl Iterator<Item = &Line> {
        self.store.iter().take(self.view.lines_shown)
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn control(&self) -> &RunControl {
        &self.control
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[must_use]
    pub fn interval(&self) -> u8 {
        self.interval
    }

    /// Lines not yet scrolled past, including those on screen.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        if self.control.terminating {
            RunState::Terminating
        } else if self.control.paused {
            RunState::Paused
        } else {
            RunState::Running
        }
    }
}
