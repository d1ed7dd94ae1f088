//! Simulation configuration.

use crate::{CoreError, CoreResult, SimClock, Tick};

/// Every tunable of the belt simulation.
///
/// Typically loaded from JSON by the application crate (with the `serde`
/// feature) and handed to the simulation builder.  `Default` reproduces the
/// reference behaviour: 20 ticks/s, 1 unit/s belts, one extraction attempt
/// every 26 ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Fixed timestep rate.
    pub ticks_per_second: u32,

    /// Item travel speed in world units per second.
    pub belt_speed: f64,

    /// Path length a queued item occupies while waiting at the sink.
    pub squash_factor: f64,

    /// Extraction attempts per second.  The tick interval is
    /// `floor(ticks_per_second / extraction_rate) + 1`.
    pub extraction_rate: f64,

    /// Largest stack a single extraction may take.
    pub max_extract: u32,

    /// How often the source side re-validates its sink and refreshes the
    /// sink's liveness stamp.
    pub refresh_interval_ticks: u64,

    /// An endpoint stamped fewer than this many ticks ago counts as in use.
    pub liveness_window_ticks: u64,

    /// Total ticks `BeltSim::run` simulates.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical item tags.
    pub seed: u64,

    /// Snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks_per_second:       20,
            belt_speed:             1.0,
            squash_factor:          0.8,
            extraction_rate:        0.8,
            max_extract:            64,
            refresh_interval_ticks: 19,
            liveness_window_ticks:  40,
            total_ticks:            20 * 60,
            seed:                   0,
            output_interval_ticks:  20,
        }
    }
}

impl SimConfig {
    /// Reject values that would stall or divide by zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ticks_per_second == 0 {
            return Err(CoreError::Config("ticks_per_second must be positive".into()));
        }
        if !(self.belt_speed.is_finite() && self.belt_speed > 0.0) {
            return Err(CoreError::Config(format!(
                "belt_speed must be positive, got {}",
                self.belt_speed
            )));
        }
        if !(self.squash_factor.is_finite() && self.squash_factor > 0.0) {
            return Err(CoreError::Config(format!(
                "squash_factor must be positive, got {}",
                self.squash_factor
            )));
        }
        if !(self.extraction_rate.is_finite() && self.extraction_rate > 0.0) {
            return Err(CoreError::Config(format!(
                "extraction_rate must be positive, got {}",
                self.extraction_rate
            )));
        }
        if self.max_extract == 0 {
            return Err(CoreError::Config("max_extract must be positive".into()));
        }
        Ok(())
    }

    /// Ticks between extraction attempts of one belt.
    #[inline]
    pub fn extraction_interval(&self) -> u64 {
        (self.ticks_per_second as f64 / self.extraction_rate).floor() as u64 + 1
    }

    /// Progress gained per tick on a path of `total_length` units.
    #[inline]
    pub fn progress_per_tick(&self, total_length: f64) -> f64 {
        self.belt_speed / total_length / self.ticks_per_second as f64
    }

    /// The tick at which `BeltSim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.ticks_per_second)
    }
}
