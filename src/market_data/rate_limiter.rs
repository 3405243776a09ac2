use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::trace;

/// Monotonic nanosecond source. Injectable so cooldown windows can be tested
/// without sleeping.
pub trait Clock: Send + Sync {
    fn now_nanos(&self) -> u64;
}

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Hand-driven clock for tests and replays.
#[derive(Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

// Sentinel for "never granted", so the very first call always passes
const NEVER: u64 = u64::MAX;

/// Per-source gate: at most one granted call per cooldown window.
///
/// The whole state is a single timestamp. A caller that sees the window open
/// still has to win the compare-and-swap, so racing callers cannot both get
/// through the same window. Denied calls leave the state untouched and never
/// block or retry.
pub struct RateLimiter {
    last_call: AtomicU64,
    cooldown: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);

    pub fn new(cooldown: Duration) -> Self {
        Self::with_clock(cooldown, Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(cooldown: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { last_call: AtomicU64::new(NEVER), cooldown, clock }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn allow(&self) -> bool {
        let now = self.clock.now_nanos();
        let last = self.last_call.load(Ordering::Acquire);
        let cooldown = self.cooldown.as_nanos() as u64;

        if last != NEVER && now.saturating_sub(last) < cooldown {
            trace!(elapsed_ns = now.saturating_sub(last), cooldown_ns = cooldown, "Rate limited");
            return false;
        }

        self.last_call
            .compare_exchange(last, now, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COOLDOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;

    fn manual(cooldown: Duration) -> (RateLimiter, ManualClock) {
        let clock = ManualClock::new();
        let limiter = RateLimiter::with_clock(cooldown, Arc::new(clock.clone()));
        (limiter, clock)
    }

    #[test]
    fn test_first_call_is_allowed() {
        let (limiter, _clock) = manual(Duration::from_secs(2));
        assert!(limiter.allow());
    }

    #[test]
    fn test_second_call_within_window_is_denied() {
        let (limiter, clock) = manual(Duration::from_secs(2));
        assert!(limiter.allow());
        clock.advance(Duration::from_millis(1999));
        assert!(!limiter.allow());
    }

    #[test]
    fn test_call_after_cooldown_is_allowed_again() {
        let (limiter, clock) = manual(Duration::from_secs(2));
        assert!(limiter.allow());
        assert!(!limiter.allow());
        clock.advance(Duration::from_secs(2));
        assert!(limiter.allow());
        assert!(!limiter.allow());
    }

    #[test]
    fn test_denied_call_does_not_extend_window() {
        let (limiter, clock) = manual(Duration::from_secs(2));
        assert!(limiter.allow());
        clock.advance(Duration::from_secs(1));
        assert!(!limiter.allow());
        clock.advance(Duration::from_secs(1));
        assert!(limiter.allow());
    }

    #[test]
    fn test_concurrent_callers_get_one_grant_per_window() {
        let (limiter, clock) = manual(Duration::from_secs(2));
        let threads = 16;
        let barrier = Barrier::new(threads);

        let granted = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        limiter.allow()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).filter(|&ok| ok).count()
        });
        assert_eq!(granted, 1);

        clock.advance(Duration::from_secs(3));
        assert!(limiter.allow());
    }

    #[test]
    fn test_monotonic_clock_allows_first_call() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.cooldown(), Duration::from_secs(2));
        assert!(limiter.allow());
        assert!(!limiter.allow());
    }
}
