//! One-shot scan timer with reschedule support.
//!
//! The seeker arms the timer after every scan and reads the elapsed time
//! since the last fire when its interval changes, so the remaining wait
//! can be adjusted rather than restarted.
use serde::Serialize;

/// A single-fire countdown advanced by the host's tick.
///
/// `tick` returns `true` when the armed delay is exhausted; firing
/// disarms the timer and resets the elapsed clock. Rearming via
/// [`ScanTimer::schedule_once`] does not touch the elapsed clock, which
/// keeps measuring time since the last fire across reschedules.
///
/// # Examples
/// ```
/// use sightline::timer::ScanTimer;
/// let mut timer = ScanTimer::idle();
/// timer.schedule_once(1.0);
/// assert!(!timer.tick(0.5));
/// assert!(timer.tick(0.5));
/// assert_eq!(timer.elapsed_since_last_fire(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanTimer {
    remaining: f32,
    elapsed: f32,
    armed: bool,
}

impl ScanTimer {
    /// A timer armed to fire on the first tick, whatever its delta.
    pub fn due_now() -> Self {
        Self {
            remaining: 0.0,
            elapsed: 0.0,
            armed: true,
        }
    }

    /// A disarmed timer.
    pub fn idle() -> Self {
        Self {
            remaining: 0.0,
            elapsed: 0.0,
            armed: false,
        }
    }

    /// Arms the timer to fire after `delay` seconds.
    pub fn schedule_once(&mut self, delay: f32) {
        self.remaining = delay;
        self.armed = true;
    }

    /// Disarms the timer without resetting the elapsed clock.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Seconds accumulated since the last fire, or since construction.
    pub fn elapsed_since_last_fire(&self) -> f32 {
        self.elapsed
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advances both clocks by `dt` seconds.
    ///
    /// Returns `true` when the timer fires. The elapsed clock keeps
    /// running while disarmed so a later reschedule still sees the full
    /// time since the last fire.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if !self.armed {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.armed = false;
            self.elapsed = 0.0;
            return true;
        }
        false
    }
}

impl Default for ScanTimer {
    fn default() -> Self {
        Self::due_now()
    }
}
