//! Jump state machine
//!
//! `Idle -> Rising` on jump intent while grounded, `Rising -> Idle` on an
//! early landing, `Rising -> Falling` once the rise curve completes or an
//! impulse ascent tops out, `Falling -> Idle` on landing.
//!
//! Curve jumps follow `sin(t) * amplitude` for `t` in `0..=pi` instead of
//! integrating velocity. When the curve completes in the air, descent is
//! seeded with the curve's slope at `t = pi` so the hand-off to gravity
//! integration is seamless.

use std::f32::consts::PI;

use super::state::{JumpPhase, KinematicBody, RiseCurve};
use super::tick::TickInput;
use crate::tuning::{JumpModel, Tuning};

/// Handle jump intents for this step. Returns true on takeoff.
pub fn apply_jump_input(body: &mut KinematicBody, input: &TickInput, tuning: &Tuning) -> bool {
    let can_jump = body.grounded && body.jump_phase == JumpPhase::Idle;
    let wants_jump = input.jump_pressed || (tuning.rejump_while_held && input.jump_held);

    match tuning.jump_model {
        JumpModel::Impulse => {
            if can_jump && wants_jump {
                body.vel.y = -tuning.jump_force * body.gravity.sign();
                body.jump_phase = JumpPhase::Rising;
                return true;
            }
        }
        JumpModel::Arc => {
            if can_jump && wants_jump {
                start_curve(body, tuning.curve_amplitude);
                return true;
            }
        }
        JumpModel::Charge => {
            if input.jump_held {
                body.charge = (body.charge + 1.0).min(tuning.charge_cap);
            }
            let at_cap = input.jump_held && body.charge >= tuning.charge_cap;
            if can_jump && (input.jump_released || at_cap) {
                // Amplitude is latched here; later charge never reshapes this arc
                start_curve(body, tuning.charge_amplitude(body.charge));
                return true;
            }
        }
    }
    false
}

fn start_curve(body: &mut KinematicBody, amplitude: f32) {
    body.rise = Some(RiseCurve {
        origin_y: body.pos.y,
        amplitude,
    });
    body.jump_elapsed = 0.0;
    body.jump_phase = JumpPhase::Rising;
}

/// Set this step's vertical displacement: from the rise curve if one is
/// active, otherwise by gravity integration.
pub fn integrate_vertical(body: &mut KinematicBody, tuning: &Tuning) {
    let Some(curve) = body.rise else {
        body.vel.y += tuning.gravity * body.gravity.sign();
        return;
    };

    body.jump_elapsed += tuning.curve_step;
    if body.jump_elapsed <= PI {
        let target = curve.height_at(body.jump_elapsed, body.gravity);
        body.vel.y = target - body.pos.y;
    } else {
        body.end_curve();
        body.vel.y = tuning.curve_exit_speed(curve.amplitude) * body.gravity.sign();
        body.jump_phase = JumpPhase::Falling;
    }
}

/// Recompute the phase from the Y resolution outcome. Returns true on landing.
pub fn settle_phase(body: &mut KinematicBody) -> bool {
    if body.grounded {
        let landed = body.jump_phase != JumpPhase::Idle;
        if landed {
            body.end_curve();
            body.charge = 0.0;
        }
        body.jump_phase = JumpPhase::Idle;
        return landed;
    }

    body.jump_phase = if body.rise.is_some() {
        JumpPhase::Rising
    } else {
        ballistic_phase(body)
    };
    false
}

/// Phase implied by vertical velocity alone
pub fn ballistic_phase(body: &KinematicBody) -> JumpPhase {
    if body.vel.y != 0.0 && !body.gravity.is_falling(body.vel.y) {
        JumpPhase::Rising
    } else {
        JumpPhase::Falling
    }
}
