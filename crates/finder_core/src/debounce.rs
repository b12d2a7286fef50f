use std::time::{Duration, Instant};

/// Quiescence window applied to the search box.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Holds back a rapidly changing value until it has been stable for `window`.
///
/// Time is supplied by the caller, so the primitive never reads a clock.
/// Every `input` restarts the window and replaces the pending value; a
/// superseded value is never yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn input(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Yields the pending value once the window has elapsed since the last input.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (_, changed_at) = self.pending.as_ref()?;
        if now.saturating_duration_since(*changed_at) >= self.window {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Drops any pending value. Nothing propagates after a cancel until the next input.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// `None` when nothing is pending, or when the window reaches past what
    /// `Instant` can represent (such a value never settles).
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .and_then(|(_, changed_at)| changed_at.checked_add(self.window))
    }
}
