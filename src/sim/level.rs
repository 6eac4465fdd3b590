//! Level data: static geometry, interactables, start and finish
//!
//! Blocks and interactables are stored in registration order, which is also
//! the order collision and interaction passes visit them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, Region};
use crate::consts::*;
use crate::error::InvalidGeometryError;

/// Immutable axis-aligned solid block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticBlock {
    pub rect: Rect,
}

impl StaticBlock {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

/// Interactable types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractableKind {
    /// Bounces only while jump is held
    Orb { flips_gravity: bool },
    /// Bounces on contact
    Pad { flips_gravity: bool },
    /// Resets the body to the level start
    Hazard,
    /// Flips gravity on entry without touching velocity
    GravityZone,
    /// Completes the level on contact
    Finish,
}

impl InteractableKind {
    /// Orbs, pads and zones fire once per overlap episode
    pub fn is_rearmable(&self) -> bool {
        matches!(
            self,
            InteractableKind::Orb { .. }
                | InteractableKind::Pad { .. }
                | InteractableKind::GravityZone
        )
    }

    pub fn flips_gravity(&self) -> bool {
        match *self {
            InteractableKind::Orb { flips_gravity } | InteractableKind::Pad { flips_gravity } => {
                flips_gravity
            }
            InteractableKind::GravityZone => true,
            InteractableKind::Hazard | InteractableKind::Finish => false,
        }
    }
}

/// A trigger placed in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactable {
    pub kind: InteractableKind,
    pub region: Region,
    /// Set on trigger, cleared as soon as the body stops overlapping
    #[serde(default)]
    pub used: bool,
}

impl Interactable {
    pub fn new(kind: InteractableKind, region: Region) -> Self {
        Self {
            kind,
            region,
            used: false,
        }
    }

    pub fn orb(center: Vec2, radius: f32, flips_gravity: bool) -> Self {
        Self::new(
            InteractableKind::Orb { flips_gravity },
            Region::circle(center, radius),
        )
    }

    pub fn pad(rect: Rect, flips_gravity: bool) -> Self {
        Self::new(InteractableKind::Pad { flips_gravity }, Region::Rect(rect))
    }

    pub fn hazard(rect: Rect) -> Self {
        Self::new(InteractableKind::Hazard, Region::Rect(rect))
    }

    pub fn gravity_zone(rect: Rect) -> Self {
        Self::new(InteractableKind::GravityZone, Region::Rect(rect))
    }

    pub fn finish(rect: Rect) -> Self {
        Self::new(InteractableKind::Finish, Region::Rect(rect))
    }
}

/// A playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub blocks: Vec<StaticBlock>,
    pub interactables: Vec<Interactable>,
    /// Top-left of the body at spawn
    pub start: Vec2,
    /// Crossing this horizontal coordinate completes the level
    pub finish_x: f32,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            interactables: Vec::new(),
            start: Vec2::ZERO,
            finish_x: DEFAULT_FINISH_X,
        }
    }
}

impl Level {
    pub fn new(start: Vec2, finish_x: f32) -> Self {
        Self {
            start,
            finish_x,
            ..Self::default()
        }
    }

    pub fn push_block(&mut self, block: StaticBlock) {
        self.blocks.push(block);
    }

    pub fn push_interactable(&mut self, interactable: Interactable) {
        self.interactables.push(interactable);
    }

    /// Every pair of interpenetrating blocks, in registration order
    pub fn overlapping_blocks(&self) -> Vec<InvalidGeometryError> {
        let mut overlaps = Vec::new();
        for (i, a) in self.blocks.iter().enumerate() {
            for (j, b) in self.blocks.iter().enumerate().skip(i + 1) {
                if a.rect.intersects(&b.rect) {
                    overlaps.push(InvalidGeometryError {
                        first: i,
                        second: j,
                    });
                }
            }
        }
        overlaps
    }

    /// Reject geometry whose collision result would depend on block order
    pub fn validate(&self) -> Result<(), InvalidGeometryError> {
        match self.overlapping_blocks().first() {
            Some(err) => Err(*err),
            None => Ok(()),
        }
    }

    /// Has a body with this footprint reached the end of the level?
    pub fn finish_reached(&self, footprint: &Rect) -> bool {
        footprint.x >= self.finish_x
            || self
                .interactables
                .iter()
                .any(|i| i.kind == InteractableKind::Finish && i.region.overlaps(footprint))
    }

    /// Clear all one-shot trigger state
    pub fn rearm_all(&mut self) {
        for interactable in &mut self.interactables {
            interactable.used = false;
        }
    }

    /// The hand-built testing room: a pit lined with spikes, three orbs
    /// (one flipping gravity) and two pads (one flipping gravity).
    pub fn testing_room() -> Self {
        const WIDTH: f32 = 900.0;
        const GROUND_Y: f32 = 400.0;
        const CEILING_Y: f32 = 80.0;
        const PIT_LEFT_X: f32 = 300.0;
        const PIT_RIGHT_X: f32 = 540.0;
        const PIT_WALL_HEIGHT: f32 = 160.0;
        const PIT_FLOOR_Y: f32 = GROUND_Y - BLOCK_SIZE;
        const SPIKE_SIZE: f32 = 30.0;

        let mut level = Level::new(Vec2::new(BLOCK_SIZE + 10.0, 300.0), WIDTH);

        // Wall spans between ceiling and ground so no two blocks interpenetrate
        let ceiling_bottom = CEILING_Y + BLOCK_SIZE;
        level.push_block(StaticBlock::new(
            0.0,
            ceiling_bottom,
            BLOCK_SIZE,
            GROUND_Y - ceiling_bottom,
        ));
        level.push_block(StaticBlock::new(0.0, GROUND_Y, WIDTH, BLOCK_SIZE));
        level.push_block(StaticBlock::new(0.0, CEILING_Y, WIDTH, BLOCK_SIZE));
        level.push_block(StaticBlock::new(
            PIT_LEFT_X,
            GROUND_Y - PIT_WALL_HEIGHT,
            BLOCK_SIZE,
            PIT_WALL_HEIGHT,
        ));
        level.push_block(StaticBlock::new(
            PIT_RIGHT_X - BLOCK_SIZE,
            GROUND_Y - PIT_WALL_HEIGHT,
            BLOCK_SIZE,
            PIT_WALL_HEIGHT,
        ));
        level.push_block(StaticBlock::new(
            PIT_LEFT_X + BLOCK_SIZE,
            PIT_FLOOR_Y,
            (PIT_RIGHT_X - PIT_LEFT_X) - BLOCK_SIZE * 2.0,
            BLOCK_SIZE,
        ));

        // Spike hitboxes are narrower than the drawn triangles
        let mut x = PIT_LEFT_X + BLOCK_SIZE;
        while x < PIT_RIGHT_X - BLOCK_SIZE {
            level.push_interactable(Interactable::hazard(Rect::new(
                x + 9.0,
                PIT_FLOOR_Y - 18.0,
                12.0,
                18.0,
            )));
            x += SPIKE_SIZE;
        }

        level.push_interactable(Interactable::orb(
            Vec2::new(PIT_LEFT_X - 40.0, GROUND_Y - 60.0),
            ORB_RADIUS,
            false,
        ));
        level.push_interactable(Interactable::orb(
            Vec2::new((PIT_LEFT_X + PIT_RIGHT_X) / 2.0, PIT_FLOOR_Y - 50.0),
            ORB_RADIUS,
            false,
        ));
        level.push_interactable(Interactable::orb(
            Vec2::new(120.0, GROUND_Y - 120.0),
            ORB_RADIUS,
            true,
        ));

        level.push_interactable(Interactable::pad(
            Rect::new(200.0, GROUND_Y - PAD_HEIGHT, PAD_WIDTH, PAD_HEIGHT),
            false,
        ));
        level.push_interactable(Interactable::pad(
            Rect::new(650.0, GROUND_Y - PAD_HEIGHT, PAD_WIDTH, PAD_HEIGHT),
            true,
        ));

        level
    }
}
