use foundation::time::Millis;

/// Opaque handle to a scheduled deferred callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(raw: u64) -> Self {
        TimerHandle(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// No host event loop to schedule on (e.g. no `window`).
    Unavailable,
    Host(String),
}

impl std::fmt::Display for TimerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerError::Unavailable => write!(f, "timer host unavailable"),
            TimerError::Host(msg) => write!(f, "timer host error: {msg}"),
        }
    }
}

impl std::error::Error for TimerError {}

/// Deferred-callback driver.
///
/// The driver only hands out handles; delivering a fired handle back to its
/// owner is up to the caller (a browser dispatch closure, or
/// [`VirtualTimers::advance`] in tests).
pub trait TimerDriver {
    fn schedule(&mut self, delay: Millis) -> Result<TimerHandle, TimerError>;

    /// Cancels a pending timer.
    ///
    /// Returns `true` if the timer was still pending.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Forgets a timer that has already fired.
    fn release(&mut self, handle: TimerHandle);
}

/// Deterministic virtual clock.
///
/// Ordering contract: timers fire by `(due, scheduling order)`, so replays
/// with the same inputs always produce the same sequence.
#[derive(Debug, Default)]
pub struct VirtualTimers {
    now: Millis,
    next_handle: u64,
    pending: Vec<(Millis, TimerHandle)>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advances the clock and returns every timer that came due, in firing order.
    pub fn advance(&mut self, by: Millis) -> Vec<TimerHandle> {
        self.now = self.now + by;
        // Handles are allocated monotonically, so they double as the insertion order.
        self.pending.sort_by(|(da, ha), (db, hb)| da.cmp(db).then_with(|| ha.cmp(hb)));

        let now = self.now;
        let split = self.pending.partition_point(|(due, _)| *due <= now);
        self.pending.drain(..split).map(|(_, h)| h).collect()
    }
}

impl TimerDriver for VirtualTimers {
    fn schedule(&mut self, delay: Millis) -> Result<TimerHandle, TimerError> {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.pending.push((self.now + delay, handle));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(_, h)| *h != handle);
        self.pending.len() != before
    }

    fn release(&mut self, _handle: TimerHandle) {}
}

#[cfg(test)]
mod tests {
    use super::{TimerDriver, VirtualTimers};
    use foundation::time::Millis;

    #[test]
    fn fires_when_due() {
        let mut t = VirtualTimers::new();
        let h = t.schedule(Millis(800)).unwrap();
        assert!(t.advance(Millis(799)).is_empty());
        assert_eq!(t.advance(Millis(1)), vec![h]);
        assert_eq!(t.pending_count(), 0);
    }

    #[test]
    fn fires_in_due_then_schedule_order() {
        let mut t = VirtualTimers::new();
        let late = t.schedule(Millis(50)).unwrap();
        let a = t.schedule(Millis(10)).unwrap();
        let b = t.schedule(Millis(10)).unwrap();
        assert_eq!(t.advance(Millis(100)), vec![a, b, late]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut t = VirtualTimers::new();
        let h = t.schedule(Millis(5)).unwrap();
        assert!(t.cancel(h));
        assert!(!t.cancel(h));
        assert!(t.advance(Millis(10)).is_empty());
    }

    #[test]
    fn delays_are_relative_to_now() {
        let mut t = VirtualTimers::new();
        t.advance(Millis(1000));
        let h = t.schedule(Millis(800)).unwrap();
        assert!(t.advance(Millis(700)).is_empty());
        assert_eq!(t.advance(Millis(100)), vec![h]);
        assert_eq!(t.now(), Millis(1800));
    }
}
