//! Data-driven game balance
//!
//! Every physics constant the simulation consumes lives here, so alternate
//! movement variants are a JSON file away instead of a code change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_FINISH_X;
use crate::error::TuningError;
use crate::seconds_to_steps;

/// How a jump is shaped once it leaves the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum JumpModel {
    /// Instant upward velocity, then plain gravity
    #[default]
    Impulse,
    /// Fixed-height sine rise curve
    Arc,
    /// Sine rise curve whose height scales with how long jump was held.
    /// A press only starts charging; takeoff happens on release or at the cap.
    Charge,
}

impl JumpModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            JumpModel::Impulse => "impulse",
            JumpModel::Arc => "arc",
            JumpModel::Charge => "charge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "impulse" => Some(JumpModel::Impulse),
            "arc" | "sine" => Some(JumpModel::Arc),
            "charge" => Some(JumpModel::Charge),
            _ => None,
        }
    }
}

/// Horizontal control scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementMode {
    /// Left/right intents drive horizontal speed
    #[default]
    Manual,
    /// Always moving forward at full speed (runner variant)
    AutoRun,
}

/// Physics constants, in world units per fixed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub jump_model: JumpModel,
    pub movement: MovementMode,

    // === Movement ===
    pub move_speed: f32,
    /// Downward acceleration per step, along the current gravity direction
    pub gravity: f32,
    /// Initial upward speed of an impulse jump
    pub jump_force: f32,
    /// Holding jump re-jumps on every landing
    pub rejump_while_held: bool,

    // === Interactables ===
    pub orb_bounce: f32,
    pub pad_bounce: f32,

    // === Cosmetic ===
    /// Degrees per step while airborne
    pub rotation_speed: f32,

    // === Rise curve ===
    /// Curve parameter advance per step (radians)
    pub curve_step: f32,
    /// Peak height of a full arc
    pub curve_amplitude: f32,

    // === Charge jump ===
    /// Charge stops accumulating here and takeoff is forced
    pub charge_cap: f32,
    /// Charge that yields exactly `curve_amplitude`
    pub reference_charge: f32,
    /// Charge floor applied at takeoff so a tap still leaves the ground
    pub min_charge: f32,

    // === Hazards ===
    /// Steps of ignored input after a hazard reset
    pub stun_steps: u32,

    pub default_finish_x: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            jump_model: JumpModel::Impulse,
            movement: MovementMode::Manual,

            move_speed: 5.0,
            gravity: 0.6,
            jump_force: 12.0,
            rejump_while_held: true,

            orb_bounce: 12.0,
            pad_bounce: 14.0,

            rotation_speed: 6.0,

            curve_step: 0.08,
            curve_amplitude: 120.0,

            charge_cap: 45.0,
            reference_charge: 30.0,
            min_charge: 6.0,

            stun_steps: seconds_to_steps(0.6),

            default_finish_x: DEFAULT_FINISH_X,
        }
    }
}

impl Tuning {
    /// Defaults with a different jump model
    pub fn with_jump_model(jump_model: JumpModel) -> Self {
        Self {
            jump_model,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load overrides from a JSON file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!(
            "Loaded tuning from {} (jump model: {})",
            path.as_ref().display(),
            tuning.jump_model.as_str()
        );
        Ok(tuning)
    }

    /// Per-step descent speed at the end of a full rise curve
    pub fn curve_exit_speed(&self, amplitude: f32) -> f32 {
        // d/dt of -sin(t) * A at t = pi, scaled by the per-step advance
        -(std::f32::consts::PI.cos()) * amplitude * self.curve_step
    }

    /// Rise amplitude for a charge jump, latched at takeoff
    pub fn charge_amplitude(&self, charge: f32) -> f32 {
        let charge = charge.clamp(self.min_charge, self.charge_cap);
        self.curve_amplitude * (charge / self.reference_charge)
    }
}
