//! Gravity Dash - a 2D kinematic platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, interactables, jump state)
//! - `persistence`: Level record text format
//! - `course`: Seeded obstacle course generation
//! - `tuning`: Data-driven game balance
//! - `error`: Level loading and invariant errors

pub mod course;
pub mod error;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use error::{
    InvalidGeometryError, LevelFileError, LevelLoadError, SimulationInvariantViolation,
    TuningError,
};
pub use tuning::{JumpModel, MovementMode, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (steps per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;

    /// Horizontal world coordinate that ends a level without a FINISH record
    pub const DEFAULT_FINISH_X: f32 = 1000.0;

    /// Controlled body is a square of this side length
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Standard block thickness for floors, ceilings and walls
    pub const BLOCK_SIZE: f32 = 40.0;

    /// Orb trigger radius
    pub const ORB_RADIUS: f32 = 12.0;
    pub const PAD_WIDTH: f32 = 40.0;
    pub const PAD_HEIGHT: f32 = 12.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert a duration in seconds into whole fixed steps
#[inline]
pub fn seconds_to_steps(seconds: f32) -> u32 {
    (seconds * consts::SIM_HZ as f32).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-6.0), 354.0);
        assert_eq!(normalize_degrees(726.0), 6.0);
        let tiny = normalize_degrees(-1e-7);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_seconds_to_steps() {
        assert_eq!(seconds_to_steps(0.6), 36);
        assert_eq!(seconds_to_steps(1.0), 60);
        assert_eq!(seconds_to_steps(-1.0), 0);
    }
}
