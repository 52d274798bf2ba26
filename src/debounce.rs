//! Trigger debouncing.
//!
//! Physical key contacts bounce, and keyboard-style sources auto-repeat;
//! either would otherwise turn one press into a burst of trigger events.
//! [`Debouncer`] accepts an event only when at least the configured window
//! has passed since the previously accepted one. The rule is applied to
//! event timestamps, not wall-clock reads, so it behaves identically for
//! every event source and is deterministic under test.

use std::time::{Duration, Instant};

/// Suppresses trigger events arriving within a fixed window of the previous
/// accepted event.
///
/// # Example
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use climate_button::Debouncer;
///
/// let mut debouncer = Debouncer::new();
/// let t0 = Instant::now();
///
/// assert!(debouncer.accept(t0));
/// assert!(!debouncer.accept(t0 + Duration::from_millis(200)));
/// assert!(debouncer.accept(t0 + Duration::from_secs(2)));
/// ```
#[derive(Clone, Debug)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    /// Canonical debounce window for physical key input.
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

    /// Creates a debouncer with the default 1-second window.
    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Creates a debouncer with a custom window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Accept or reject an event with the given timestamp.
    ///
    /// The first event is always accepted. A later event is accepted iff
    /// `at - last_accepted >= window`; on accept the window restarts at
    /// `at`.
    pub fn accept(&mut self, at: Instant) -> bool {
        let accepted = match self.last_accepted {
            None => true,
            Some(last) => at.saturating_duration_since(last) >= self.window,
        };
        if accepted {
            self.last_accepted = Some(at);
        }
        accepted
    }

    /// The configured window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
