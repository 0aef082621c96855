//! Per-ability countdown timer.
//!
//! A [`CooldownTimer`] only moves in two ways: [`CooldownTimer::start`]
//! resets `remaining` to the full duration, and [`CooldownTimer::tick`]
//! subtracts elapsed time until it clamps at exactly zero. There is no
//! refresh or partial reset.
use std::time::Duration;

/// What a single [`CooldownTimer::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownStatus {
    /// The timer was already at zero; nothing changed.
    Idle,
    /// The timer counted down and is still running.
    Ticking { remaining: Duration },
    /// The timer reached zero on this tick.
    Ended,
}

impl CooldownStatus {
    /// Returns true if `remaining` changed during the tick.
    pub fn changed(self) -> bool {
        !matches!(self, CooldownStatus::Idle)
    }
}

/// Countdown for one ability of one entity.
///
/// Invariant: `0 <= remaining <= duration`, and the timer is on cooldown
/// exactly when `remaining > 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CooldownTimer {
    duration: Duration,
    remaining: Duration,
}

impl CooldownTimer {
    /// Creates a ready timer that will count down from `duration` once started.
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: Duration::ZERO,
        }
    }

    /// Restarts the countdown from the full duration.
    pub fn start(&mut self) {
        self.remaining = self.duration;
    }

    /// Replaces the duration and restarts the countdown from it.
    pub fn start_with(&mut self, duration: Duration) {
        self.duration = duration;
        self.remaining = duration;
    }

    /// Advances the countdown by `elapsed`, clamping at zero.
    pub fn tick(&mut self, elapsed: Duration) -> CooldownStatus {
        if self.remaining.is_zero() {
            return CooldownStatus::Idle;
        }

        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            CooldownStatus::Ended
        } else {
            CooldownStatus::Ticking {
                remaining: self.remaining,
            }
        }
    }

    /// Returns true when the ability may be used again.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Returns true while counting down.
    #[inline]
    pub fn is_on_cooldown(&self) -> bool {
        !self.is_ready()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Fraction of the cooldown still to run, in `[0, 1]`.
    ///
    /// A zero-length cooldown always reports `0.0`.
    pub fn percent(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}
