use foundation::time::Timestamp;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebounceMode {
    /// Release only after `interval_ms` without a new push.
    Trailing,
    /// Release at most once per `interval_ms`: the first push after a quiet
    /// period goes out immediately, later ones are coalesced into the next slot.
    FixedInterval,
}

/// Coalesces a stream of values, keeping only the latest.
///
/// Time is supplied by the caller, so behavior is deterministic and replayable.
/// Callers push on every update and poll on every tick.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    mode: DebounceMode,
    interval_ms: u64,
    pending: Option<T>,
    last_push: Option<Timestamp>,
    last_release: Option<Timestamp>,
}

impl<T> Debouncer<T> {
    pub fn new(mode: DebounceMode, interval_ms: u64) -> Self {
        Self {
            mode,
            interval_ms,
            pending: None,
            last_push: None,
            last_release: None,
        }
    }

    pub fn trailing(interval_ms: u64) -> Self {
        Self::new(DebounceMode::Trailing, interval_ms)
    }

    pub fn fixed_interval(interval_ms: u64) -> Self {
        Self::new(DebounceMode::FixedInterval, interval_ms)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Offers a new value. Returns it straight back if it may be released now.
    pub fn push(&mut self, now: Timestamp, value: T) -> Option<T> {
        self.pending = Some(value);
        self.last_push = Some(now);
        match self.mode {
            DebounceMode::Trailing if self.interval_ms == 0 => self.release(now),
            DebounceMode::Trailing => None,
            DebounceMode::FixedInterval => self.poll(now),
        }
    }

    /// Releases the pending value if its slot has come.
    pub fn poll(&mut self, now: Timestamp) -> Option<T> {
        self.pending.as_ref()?;
        let due = match self.mode {
            DebounceMode::Trailing => self
                .last_push
                .is_none_or(|t| now.since(t) >= self.interval_ms),
            DebounceMode::FixedInterval => self
                .last_release
                .is_none_or(|t| now.since(t) >= self.interval_ms),
        };
        if due { self.release(now) } else { None }
    }

    /// Releases the pending value regardless of timing.
    pub fn flush(&mut self, now: Timestamp) -> Option<T> {
        self.release(now)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take()
    }

    fn release(&mut self, now: Timestamp) -> Option<T> {
        let value = self.pending.take()?;
        self.last_release = Some(now);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use foundation::time::Timestamp;

    #[test]
    fn trailing_waits_for_quiet_period() {
        let mut d = Debouncer::trailing(100);
        assert_eq!(d.push(Timestamp(0), 1), None);
        assert_eq!(d.push(Timestamp(50), 2), None);
        assert_eq!(d.poll(Timestamp(120)), None);
        assert_eq!(d.poll(Timestamp(150)), Some(2));
        assert_eq!(d.poll(Timestamp(500)), None);
    }

    #[test]
    fn trailing_with_zero_interval_is_passthrough() {
        let mut d = Debouncer::trailing(0);
        assert_eq!(d.push(Timestamp(0), "a"), Some("a"));
        assert!(!d.has_pending());
    }

    #[test]
    fn fixed_interval_releases_first_push_immediately() {
        let mut d = Debouncer::fixed_interval(16);
        assert_eq!(d.push(Timestamp(0), 1), Some(1));
        assert_eq!(d.push(Timestamp(5), 2), None);
        assert_eq!(d.push(Timestamp(10), 3), None);
        assert_eq!(d.poll(Timestamp(15)), None);
        assert_eq!(d.poll(Timestamp(16)), Some(3));
    }

    #[test]
    fn fixed_interval_bounds_release_rate_during_a_drag() {
        let mut d = Debouncer::fixed_interval(50);
        let mut released = 0;
        // One update per millisecond for half a second.
        for t in 0..500u64 {
            if d.push(Timestamp(t), t).is_some() {
                released += 1;
            }
        }
        assert_eq!(released, 10);
        assert!(d.has_pending());
    }

    #[test]
    fn flush_and_cancel() {
        let mut d = Debouncer::trailing(1_000);
        d.push(Timestamp(0), 'x');
        assert_eq!(d.flush(Timestamp(1)), Some('x'));
        d.push(Timestamp(2), 'y');
        assert_eq!(d.cancel(), Some('y'));
        assert_eq!(d.poll(Timestamp(5_000)), None);
    }
}
