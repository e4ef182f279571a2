//! Event sources for the run loop.
//!
//! [`SignalEvents`] blocks every signal the viewer cares about and consumes
//! them synchronously with `sigwait`, so there are no asynchronous handlers
//! and each event is processed to completion before the next wait.
//! [`ScriptedEvents`] replays a fixed list, for tests and demos.

use std::collections::VecDeque;

use crate::core::errors::{Result, ScrollError};
use crate::viewer::engine::Event;

/// Where the run loop gets its next event from.
pub trait EventSource {
    /// Arrange for the first [`Event::Tick`] to arrive without waiting a
    /// full second.
    fn bootstrap(&mut self) -> Result<()>;

    /// Block until the next event.
    fn next_event(&mut self) -> Result<Event>;

    /// Schedule the next one-second tick.
    fn arm_tick(&mut self) -> Result<()>;
}

#[cfg(unix)]
pub use self::unix::{SignalEvents, waited_signals};

#[cfg(unix)]
mod unix {
    use nix::sys::signal::{SigSet, SigmaskHow, Signal, raise, sigprocmask};
    use nix::unistd::alarm;

    use super::EventSource;
    use crate::core::errors::{Result, ScrollError};
    use crate::viewer::engine::Event;
    use crate::viewer::layout::Geometry;

    /// Signals left at their default disposition: job control noise and
    /// synchronous faults. SIGKILL/SIGSTOP cannot be blocked anyway.
    const PASSTHROUGH: [Signal; 12] = [
        Signal::SIGCHLD,
        Signal::SIGCONT,
        Signal::SIGTTIN,
        Signal::SIGTTOU,
        Signal::SIGURG,
        Signal::SIGSEGV,
        Signal::SIGBUS,
        Signal::SIGFPE,
        Signal::SIGILL,
        Signal::SIGTRAP,
        Signal::SIGKILL,
        Signal::SIGSTOP,
    ];

    /// The set of signals the viewer blocks and waits on.
    ///
    /// SIGWINCH is only included when the terminal size is re-sampled on resize.
    #[must_use]
    pub fn waited_signals(follow_resize: bool) -> SigSet {
        let mut set = SigSet::empty();
        for signal in Signal::iterator() {
            if PASSTHROUGH.contains(&signal) {
                continue;
            }
            if signal == Signal::SIGWINCH && !follow_resize {
                continue;
            }
            set.add(signal);
        }
        set
    }

    /// Map a delivered signal onto a viewer event.
    pub(super) fn classify(signal: Signal) -> Result<Event> {
        Ok(match signal {
            Signal::SIGALRM => Event::Tick,
            Signal::SIGTSTP => Event::Pause,
            Signal::SIGINT => Event::Resume,
            Signal::SIGWINCH => Event::Resize(Geometry::sample()?),
            other => Event::Terminate {
                signal: other.as_str(),
            },
        })
    }

    /// `sigwait`-driven event source backed by `alarm(1)`.
    #[derive(Debug)]
    pub struct SignalEvents {
        waited: SigSet,
    }

    impl SignalEvents {
        /// Replace the process signal mask with the waited set.
        ///
        /// Must run before any other thread is spawned.
        pub fn install(follow_resize: bool) -> Result<Self> {
            let waited = waited_signals(follow_resize);
            sigprocmask(SigmaskHow::SIG_SETMASK, Some(&waited), None)
                .map_err(|errno| ScrollError::signal("sigprocmask", errno))?;
            Ok(Self { waited })
        }
    }

    impl EventSource for SignalEvents {
        fn bootstrap(&mut self) -> Result<()> {
            raise(Signal::SIGALRM).map_err(|errno| ScrollError::signal("raise", errno))
        }

        fn next_event(&mut self) -> Result<Event> {
            let signal = self
                .waited
                .wait()
                .map_err(|errno| ScrollError::signal("sigwait", errno))?;
            classify(signal)
        }

        fn arm_tick(&mut self) -> Result<()> {
            alarm::set(1);
            Ok(())
        }
    }

    impl Drop for SignalEvents {
        fn drop(&mut self) {
            alarm::cancel();
        }
    }
}

/// Replays a fixed sequence of events.
///
/// `bootstrap` queues the synthetic first tick ahead of the script. Running
/// past the end of the script is an error, so a test that forgets to
/// terminate fails instead of hanging.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<Event>,
    armed: usize,
}

impl ScriptedEvents {
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            queue: events.into_iter().collect(),
            armed: 0,
        }
    }

    /// `count` ticks.
    #[must_use]
    pub fn ticks(count: usize) -> Self {
        Self::new(std::iter::repeat_n(Event::Tick, count))
    }

    /// Append an event to the script.
    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// How many times the tick was re-armed.
    #[must_use]
    pub fn armed(&self) -> usize {
        self.armed
    }

    /// Events not yet delivered.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn bootstrap(&mut self) -> Result<()> {
        self.queue.push_front(Event::Tick);
        Ok(())
    }

    fn next_event(&mut self) -> Result<Event> {
        self.queue.pop_front().ok_or(ScrollError::Signal {
            context: "script",
            details: "event script exhausted".to_string(),
        })
    }

    fn arm_tick(&mut self) -> Result<()> {
        self.armed += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_bootstraps_with_a_tick() {
        let mut source = ScriptedEvents::new([Event::Pause]);
        source.bootstrap().expect("bootstrap");
        assert_eq!(source.next_event().expect("tick"), Event::Tick);
        assert_eq!(source.next_event().expect("pause"), Event::Pause);
        assert!(source.next_event().is_err());
    }

    #[test]
    fn scripted_source_counts_arms() {
        let mut source = ScriptedEvents::ticks(2);
        source.arm_tick().expect("arm");
        source.arm_tick().expect("arm");
        assert_eq!(source.armed(), 2);
        assert_eq!(source.pending(), 2);
    }

    #[cfg(unix)]
    mod unix_signals {
        use nix::sys::signal::Signal;

        use nix::sys::signal::raise;

        use super::super::unix::classify;
        use super::super::{EventSource, SignalEvents, waited_signals};
        use crate::viewer::engine::Event;

        #[test]
        fn waited_set_excludes_job_control_and_faults() {
            let set = waited_signals(false);
            for signal in [
                Signal::SIGCHLD,
                Signal::SIGCONT,
                Signal::SIGTTIN,
                Signal::SIGTTOU,
                Signal::SIGURG,
                Signal::SIGWINCH,
                Signal::SIGSEGV,
            ] {
                assert!(!set.contains(signal), "{signal} must not be waited on");
            }
            for signal in [
                Signal::SIGALRM,
                Signal::SIGTSTP,
                Signal::SIGINT,
                Signal::SIGQUIT,
                Signal::SIGTERM,
                Signal::SIGHUP,
                Signal::SIGPIPE,
            ] {
                assert!(set.contains(signal), "{signal} must be waited on");
            }
        }

        // `raise` targets the calling thread, and the mask installed here only
        // covers the test thread, so the rest of the harness is unaffected.
        #[test]
        fn installed_mask_turns_signals_into_events() {
            let mut source = SignalEvents::install(false).expect("install mask");

            source.bootstrap().expect("bootstrap");
            assert_eq!(source.next_event().expect("tick"), Event::Tick);

            raise(Signal::SIGTSTP).expect("raise SIGTSTP");
            assert_eq!(source.next_event().expect("pause"), Event::Pause);

            raise(Signal::SIGINT).expect("raise SIGINT");
            assert_eq!(source.next_event().expect("resume"), Event::Resume);

            raise(Signal::SIGQUIT).expect("raise SIGQUIT");
            assert_eq!(
                source.next_event().expect("quit"),
                Event::Terminate { signal: "SIGQUIT" }
            );
        }

        #[test]
        fn resize_following_adds_sigwinch() {
            assert!(waited_signals(true).contains(Signal::SIGWINCH));
        }

        #[test]
        fn classify_maps_control_signals() {
            assert_eq!(classify(Signal::SIGALRM).expect("tick"), Event::Tick);
            assert_eq!(classify(Signal::SIGTSTP).expect("pause"), Event::Pause);
            assert_eq!(classify(Signal::SIGINT).expect("resume"), Event::Resume);
            assert_eq!(
                classify(Signal::SIGQUIT).expect("quit"),
                Event::Terminate { signal: "SIGQUIT" }
            );
            assert_eq!(
                classify(Signal::SIGPIPE).expect("pipe"),
                Event::Terminate { signal: "SIGPIPE" }
            );
        }
    }
}
