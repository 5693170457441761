//! Clocks and countdown timers
//!
//! A clock reports the time elapsed since it was last queried, so two
//! queries in the same frame return the frame delta and then ~0.

/// Opaque handle to a clock owned by a `TimerService`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockHandle(pub u32);

/// Timer capability of the host engine
pub trait TimerService {
    /// Allocate a new clock
    fn gen_clock(&mut self) -> ClockHandle;

    /// Seconds since the previous query on this clock
    fn delta_time(&mut self, clock: ClockHandle) -> f32;

    /// Start (or restart) a countdown on this clock
    fn start_timer(&mut self, duration: f32, clock: ClockHandle);

    /// True once a started countdown has elapsed
    fn is_timer_done(&mut self, clock: ClockHandle) -> bool;
}

#[derive(Debug, Clone, Default)]
struct ManualClock {
    /// Time accumulated since the last `delta_time` query
    pending: f32,
    /// Remaining countdown, if one was started
    remaining: Option<f32>,
}

/// Deterministic timers advanced by hand
///
/// Every clock accumulates whatever is passed to `advance`; queries drain it.
#[derive(Debug, Clone, Default)]
pub struct ManualTimers {
    clocks: Vec<ManualClock>,
    elapsed: f64,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward on every clock
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += f64::from(dt);
        for clock in &mut self.clocks {
            clock.pending += dt;
            if let Some(remaining) = clock.remaining.as_mut() {
                *remaining -= dt;
            }
        }
    }

    /// Total time advanced so far (seconds)
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl TimerService for ManualTimers {
    fn gen_clock(&mut self) -> ClockHandle {
        self.clocks.push(ManualClock::default());
        ClockHandle((self.clocks.len() - 1) as u32)
    }

    fn delta_time(&mut self, clock: ClockHandle) -> f32 {
        self.clocks
            .get_mut(clock.0 as usize)
            .map(|c| std::mem::take(&mut c.pending))
            .unwrap_or(0.0)
    }

    fn start_timer(&mut self, duration: f32, clock: ClockHandle) {
        if let Some(c) = self.clocks.get_mut(clock.0 as usize) {
            c.remaining = Some(duration);
        }
    }

    fn is_timer_done(&mut self, clock: ClockHandle) -> bool {
        self.clocks
            .get(clock.0 as usize)
            .and_then(|c| c.remaining)
            .is_some_and(|r| r <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_drains_on_query() {
        let mut timers = ManualTimers::new();
        let clock = timers.gen_clock();
        timers.advance(0.25);
        timers.advance(0.25);
        assert!((timers.delta_time(clock) - 0.5).abs() < 1e-6);
        // Second query in the same frame sees nothing new
        assert_eq!(timers.delta_time(clock), 0.0);
    }

    #[test]
    fn test_clocks_are_independent() {
        let mut timers = ManualTimers::new();
        let a = timers.gen_clock();
        let b = timers.gen_clock();
        timers.advance(1.0);
        assert_eq!(timers.delta_time(a), 1.0);
        timers.advance(0.5);
        assert_eq!(timers.delta_time(a), 0.5);
        assert_eq!(timers.delta_time(b), 1.5);
    }

    #[test]
    fn test_countdown() {
        let mut timers = ManualTimers::new();
        let clock = timers.gen_clock();
        assert!(!timers.is_timer_done(clock), "never-started timer is not done");

        timers.start_timer(0.5, clock);
        timers.advance(0.3);
        assert!(!timers.is_timer_done(clock));
        timers.advance(0.3);
        assert!(timers.is_timer_done(clock));

        timers.start_timer(0.5, clock);
        assert!(!timers.is_timer_done(clock));
    }

    #[test]
    fn test_unknown_clock_is_inert() {
        let mut timers = ManualTimers::new();
        timers.advance(1.0);
        assert_eq!(timers.delta_time(ClockHandle(7)), 0.0);
        assert!(!timers.is_timer_done(ClockHandle(7)));
    }
}
