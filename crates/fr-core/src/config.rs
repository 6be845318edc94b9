//! Fleet-wide tuning knobs.

use crate::{CoreError, CoreResult};

/// Top-level configuration shared by networks and agents.
///
/// Typically loaded from the game's settings file by the application and
/// handed to `Fleet::new`; `Default` gives values suited to a 1-unit tile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Seconds an agent dwells at a stop before its transaction runs.
    pub loading_secs: f32,

    /// Consumed path sections kept behind an agent for rendering trails.
    pub retained_sections: usize,

    /// How often a loading agent trims its path history, in seconds.
    pub trim_interval_secs: f32,

    /// Tile networks: octile distance (tiles) at which a node counts as
    /// arrived at the target footprint.
    pub tile_arrival_distance: f32,

    /// Track network: Manhattan distance (tiles) at which a piece counts as
    /// arrived at the target footprint.
    pub track_arrival_distance: u32,

    /// Maximum distance (world units) between two endpoints for the pieces
    /// to be considered connected.
    pub track_snap_tolerance: f32,

    /// Maximum per-axis jitter of tile waypoints as a fraction of a tile.
    pub jitter_fraction: f32,

    /// Seed of the per-network jitter generators.
    pub seed: u64,

    /// Minimum bridge deck height above the water level for boats to pass.
    pub boat_min_clearance: f32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            loading_secs:           4.0,
            retained_sections:      64,
            trim_interval_secs:     1.0,
            tile_arrival_distance:  1.5,
            track_arrival_distance: 2,
            track_snap_tolerance:   0.05,
            jitter_fraction:        0.25,
            seed:                   0,
            boat_min_clearance:     2.0,
        }
    }
}

impl FleetConfig {
    /// Reject values that would stall agents or break graph discovery.
    pub fn validate(&self) -> CoreResult<()> {
        if self.loading_secs.is_nan() || self.loading_secs < 0.0 {
            return Err(CoreError::Config(format!(
                "loading_secs must be >= 0, got {}",
                self.loading_secs
            )));
        }
        if self.trim_interval_secs.is_nan() || self.trim_interval_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "trim_interval_secs must be > 0, got {}",
                self.trim_interval_secs
            )));
        }
        if self.track_snap_tolerance.is_nan() || self.track_snap_tolerance <= 0.0 {
            return Err(CoreError::Config(format!(
                "track_snap_tolerance must be > 0, got {}",
                self.track_snap_tolerance
            )));
        }
        if !(0.0..0.5).contains(&self.jitter_fraction) {
            return Err(CoreError::Config(format!(
                "jitter_fraction must be in [0, 0.5), got {}",
                self.jitter_fraction
            )));
        }
        if self.tile_arrival_distance < 1.0 {
            return Err(CoreError::Config(format!(
                "tile_arrival_distance must be >= 1 so building footprints are reachable, got {}",
                self.tile_arrival_distance
            )));
        }
        Ok(())
    }
}
