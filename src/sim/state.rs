//! Simulation state and core types
//!
//! All per-step state lives in `SimulationState`; nothing is process-global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::level::Level;
use crate::consts::PLAYER_SIZE;
use crate::error::SimulationInvariantViolation;

/// Which way "down" points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityDir {
    /// Toward +y (screen down)
    #[default]
    Down,
    /// Toward -y
    Up,
}

impl GravityDir {
    /// Sign multiplier: +1 for Down, -1 for Up
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            GravityDir::Down => 1.0,
            GravityDir::Up => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            GravityDir::Down => GravityDir::Up,
            GravityDir::Up => GravityDir::Down,
        }
    }

    /// Is a vertical velocity heading the way gravity pulls?
    #[inline]
    pub fn is_falling(self, vy: f32) -> bool {
        vy * self.sign() > 0.0
    }
}

impl TryFrom<i32> for GravityDir {
    type Error = SimulationInvariantViolation;

    fn try_from(sign: i32) -> Result<Self, Self::Error> {
        match sign {
            1 => Ok(GravityDir::Down),
            -1 => Ok(GravityDir::Up),
            other => Err(SimulationInvariantViolation::GravitySign(other)),
        }
    }
}

impl From<GravityDir> for i32 {
    fn from(dir: GravityDir) -> Self {
        match dir {
            GravityDir::Down => 1,
            GravityDir::Up => -1,
        }
    }
}

/// Vertical jump state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    /// Standing on something
    #[default]
    Idle,
    /// Moving against gravity (rise curve or upward impulse)
    Rising,
    /// Ballistic descent
    Falling,
}

/// An in-flight sine rise curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiseCurve {
    /// Vertical position at takeoff
    pub origin_y: f32,
    /// Peak height, fixed at takeoff
    pub amplitude: f32,
}

impl RiseCurve {
    /// Target vertical position for curve parameter `t`
    pub fn height_at(&self, t: f32, gravity: GravityDir) -> f32 {
        self.origin_y - t.sin() * self.amplitude * gravity.sign()
    }
}

/// The controlled actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Top-left corner
    pub pos: Vec2,
    /// World units per step
    pub vel: Vec2,
    pub size: Vec2,
    pub grounded: bool,
    pub gravity: GravityDir,
    /// Cosmetic spin in degrees, [0, 360)
    pub rotation: f32,
    pub jump_phase: JumpPhase,
    /// Rise curve parameter, 0..=pi while a curve is active
    pub jump_elapsed: f32,
    /// Steps of jump held (charge model only)
    pub charge: f32,
    /// Active rise curve, if the current ascent follows one
    pub rise: Option<RiseCurve>,
}

impl KinematicBody {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            grounded: false,
            gravity: GravityDir::Down,
            rotation: 0.0,
            jump_phase: JumpPhase::Idle,
            jump_elapsed: 0.0,
            charge: 0.0,
            rise: None,
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Collision footprint. Rotation never affects it.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Restore spawn values, keeping size
    pub fn reset_to(&mut self, start: Vec2) {
        let size = self.size;
        *self = Self::new(start).with_size(size);
    }

    /// Invert gravity. A single assignment; grounded is recomputed next step.
    #[inline]
    pub fn flip_gravity(&mut self) {
        self.gravity = self.gravity.flipped();
    }

    /// Drop any rise curve and hand vertical motion to ballistic integration
    pub fn end_curve(&mut self) {
        self.rise = None;
        self.jump_elapsed = 0.0;
    }
}

/// Events produced by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Body touched a hazard and was sent back to the start
    HazardHit,
    /// Body reached the finish
    LevelComplete,
    /// An orb or pad launched the body (registry index)
    Bounced { index: usize },
    /// Gravity direction changed
    GravityFlipped,
    Landed,
    Jumped,
}

/// Read-only view handed to a renderer each step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub pos: Vec2,
    pub rotation: f32,
    pub gravity: GravityDir,
    pub grounded: bool,
    pub jump_phase: JumpPhase,
    pub charge: f32,
    /// False while stunned after a hazard
    pub alive: bool,
    pub complete: bool,
    pub events: Vec<GameEvent>,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub body: KinematicBody,
    /// Level geometry; only interactable `used` flags change during play
    pub level: Level,
    /// Steps of ignored input remaining after a hazard
    pub stun_steps: u32,
    /// Simulation step counter
    pub frame: u64,
    /// Set once the finish is reached; later steps are no-ops
    pub complete: bool,
}

impl SimulationState {
    pub fn new(level: Level) -> Self {
        Self {
            body: KinematicBody::new(level.start),
            level,
            stun_steps: 0,
            frame: 0,
            complete: false,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_steps > 0
    }

    /// Send the body back to the level start and re-arm every trigger.
    ///
    /// This is the one place outside the interaction pass that writes `used`
    /// flags; the body has left every region, so the next pass would clear
    /// them anyway.
    pub fn reset_body(&mut self) {
        self.body.reset_to(self.level.start);
        self.level.rearm_all();
    }

    pub fn snapshot(&self, events: Vec<GameEvent>) -> Snapshot {
        Snapshot {
            frame: self.frame,
            pos: self.body.pos,
            rotation: self.body.rotation,
            gravity: self.body.gravity,
            grounded: self.body.grounded,
            jump_phase: self.body.jump_phase,
            charge: self.body.charge,
            alive: !self.is_stunned(),
            complete: self.complete,
            events,
        }
    }
}
