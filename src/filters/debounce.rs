//! Single-slot debouncer for search input.
//!
//! Each `schedule` replaces the pending value and restarts the quiet period,
//! so at most one value is ever pending and it fires exactly once after the
//! last input. Time is passed in explicitly; the caller's event loop drives
//! `poll` on every tick.

use std::time::{Duration, Instant};

/// Quiet period before a search edit is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Replace any pending value and restart the quiet period from `now`
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Fire the pending value if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, deadline)) if now >= deadline => Some(value),
            still_waiting => {
                self.pending = still_waiting;
                None
            }
        }
    }

    /// Fire the pending value immediately, ignoring the deadline
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value without firing
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending value, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn test_burst_fires_once_after_last_keystroke() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        let keystrokes = [(0, "h"), (50, "he"), (100, "hea"), (250, "head")];

        let mut fired = Vec::new();
        let mut next_key = 0;
        // Simulate a 1ms event loop tick from t=0 to t=1000
        for ms in 0..=1000 {
            if next_key < keystrokes.len() && keystrokes[next_key].0 == ms {
                debouncer.schedule(keystrokes[next_key].1, at(start, ms));
                next_key += 1;
            }
            if let Some(value) = debouncer.poll(at(start, ms)) {
                fired.push((ms, value));
            }
        }

        assert_eq!(fired, vec![(550, "head")]);
    }

    #[test]
    fn test_not_fired_before_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.schedule("a", start);

        assert_eq!(debouncer.poll(at(start, 299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(at(start, 300)), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(at(start, 900)), None);
    }

    #[test]
    fn test_reschedule_pushes_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.schedule(1, start);
        debouncer.schedule(2, at(start, 200));
        assert_eq!(debouncer.deadline(), Some(at(start, 500)));
        assert_eq!(debouncer.poll(at(start, 400)), None);
        assert_eq!(debouncer.poll(at(start, 500)), Some(2));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.schedule("x", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(at(start, 1000)), None);
    }

    #[test]
    fn test_flush_fires_immediately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.schedule("x", start);
        assert_eq!(debouncer.flush(), Some("x"));
        assert_eq!(debouncer.flush(), None);
    }
}
