#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Monotonic frame clock.
///
/// Mirrors the usual auto-starting "get delta since last call" clock: the
/// first call to [`Clock::get_delta`] starts the clock and returns 0, every
/// later call returns the seconds elapsed since the previous one.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    start_time: Option<Instant>,
    last_update: Option<Instant>,
    /// Time since last tick
    pub delta: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Clock {
    /// Creates a clock that starts on its first tick.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock already running, whose first interval starts at `now`.
    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self {
            start_time: Some(now),
            last_update: Some(now),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Seconds since the previous call; 0 on the call that starts the clock.
    pub fn get_delta(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now` and returns the delta in seconds.
    ///
    /// Starts a stopped clock with a zero delta. A `now` earlier than the
    /// last tick also yields a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = match self.last_update {
            Some(last) => now.saturating_duration_since(last),
            None => {
                self.start_time = Some(now);
                Duration::ZERO
            }
        };
        self.last_update = Some(now);
        self.frame_count += 1;
        self.delta.as_secs_f32()
    }

    /// Total time since the clock started, as of the last tick.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.last_update) {
            (Some(start), Some(last)) => last.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_measured_between_ticks() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0);

        let dt = clock.tick_at(t0 + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);

        let dt = clock.tick_at(t0 + Duration::from_millis(50));
        assert!((dt - 0.034).abs() < 1e-6);
        assert_eq!(clock.frame_count, 2);
        assert_eq!(clock.elapsed(), Duration::from_millis(50));
    }

    #[test]
    fn first_tick_starts_the_clock() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        assert!(!clock.is_running());

        assert_eq!(clock.tick_at(t0 + Duration::from_secs(3)), 0.0);
        assert!(clock.is_running());
        assert_eq!(clock.elapsed(), Duration::ZERO);

        let dt = clock.tick_at(t0 + Duration::from_millis(3016));
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(clock.frame_count, 2);
    }

    #[test]
    fn backwards_time_gives_zero_delta() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut clock = Clock::starting_at(t0);
        assert_eq!(clock.tick_at(t0 - Duration::from_millis(5)), 0.0);
    }
}
