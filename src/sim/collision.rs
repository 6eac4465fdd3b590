//! Axis-separated collision resolution against static blocks
//!
//! Each step moves the body along X and resolves, then along Y and resolves.
//! The axes are never resolved together. Blocks are visited in registration
//! order and each overlapping block clamps independently, so a later block may
//! re-clamp a position an earlier one already corrected. That is only
//! well-defined for levels without interpenetrating blocks (see
//! `Level::validate`).

use super::level::StaticBlock;
use super::state::KinematicBody;

/// Outcome of resolving one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisResolution {
    /// Number of blocks that clamped the body
    pub contacts: u32,
    /// Body came to rest on the gravity side (Y axis only)
    pub grounded: bool,
}

/// Move the body by its horizontal velocity and push it out of any block.
///
/// Velocity is left untouched so the body keeps pressing into walls.
pub fn resolve_x(body: &mut KinematicBody, blocks: &[StaticBlock]) -> AxisResolution {
    let vx = body.vel.x;
    body.pos.x += vx;

    let mut contacts = 0;
    for block in blocks {
        if !body.rect().intersects(&block.rect) {
            continue;
        }
        if vx > 0.0 {
            body.pos.x = block.rect.left() - body.size.x;
            contacts += 1;
        } else if vx < 0.0 {
            body.pos.x = block.rect.right();
            contacts += 1;
        }
    }

    AxisResolution {
        contacts,
        grounded: false,
    }
}

/// Move the body by its vertical velocity and push it out of any block.
///
/// Moving with gravity into a block lands: the leading edge is clamped,
/// `vel.y` zeroed, `grounded` set and rotation squared up. Moving against
/// gravity into a block is a ceiling bump: clamped and zeroed only.
/// `grounded` is overwritten every call.
pub fn resolve_y(body: &mut KinematicBody, blocks: &[StaticBlock]) -> AxisResolution {
    let vy = body.vel.y;
    body.pos.y += vy;

    let falling = body.gravity.is_falling(vy);
    let mut contacts = 0;
    let mut grounded = false;

    for block in blocks {
        if !body.rect().intersects(&block.rect) {
            continue;
        }
        if vy > 0.0 {
            body.pos.y = block.rect.top() - body.size.y;
        } else if vy < 0.0 {
            body.pos.y = block.rect.bottom();
        } else {
            continue;
        }
        body.vel.y = 0.0;
        contacts += 1;
        if falling {
            grounded = true;
            body.rotation = 0.0;
        }
    }

    body.grounded = grounded;
    AxisResolution { contacts, grounded }
}
