//! Simulation time model.
//!
//! The fleet is driven by variable-length frames: every `update` receives the
//! elapsed seconds since the previous one.  `SimClock` accumulates those into
//! an absolute timestamp (used for loading timers) and counts frames as
//! `Tick`s for logging.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Accumulated simulation time.
///
/// Seconds are kept as `f64` so that long sessions do not lose sub-frame
/// precision; per-frame deltas are `f32` like every other world quantity.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds elapsed since the clock was created.
    pub elapsed_secs: f64,
    /// Number of frames advanced so far.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `delta_secs` seconds.  Negative deltas are
    /// treated as zero.
    #[inline]
    pub fn advance(&mut self, delta_secs: f32) {
        self.elapsed_secs += f64::from(delta_secs.max(0.0));
        self.current_tick = self.current_tick.next();
    }

    /// Current timestamp in seconds.
    #[inline]
    pub fn now(&self) -> f64 {
        self.elapsed_secs
    }

    /// Seconds elapsed since `earlier`, never negative.
    #[inline]
    pub fn since(&self, earlier: f64) -> f64 {
        (self.elapsed_secs - earlier).max(0.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.elapsed_secs)
    }
}
