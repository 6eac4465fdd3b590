//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (registration order of blocks and interactables)
//! - No rendering, input-device or platform dependencies

pub mod collision;
pub mod geom;
pub mod interaction;
pub mod jump;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{AxisResolution, resolve_x, resolve_y};
pub use geom::{Rect, Region};
pub use interaction::{InteractionOutcome, run_interactions};
pub use level::{Interactable, InteractableKind, Level, StaticBlock};
pub use state::{
    GameEvent, GravityDir, JumpPhase, KinematicBody, RiseCurve, SimulationState, Snapshot,
};
pub use tick::{InputSampler, TickInput, advance, step};
