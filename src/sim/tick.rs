//! Fixed timestep simulation step
//!
//! One step: apply input, integrate velocity, resolve X, resolve Y, check
//! the finish, run interactions, spin the cosmetic rotation. A hazard resets
//! the body inside the same step and starts a stun countdown measured in
//! steps; nothing here ever sleeps.

use super::collision::{resolve_x, resolve_y};
use super::interaction::run_interactions;
use super::jump;
use super::state::{GameEvent, KinematicBody, SimulationState, Snapshot};
use crate::normalize_degrees;
use crate::tuning::{MovementMode, Tuning};

/// Input intents for a single step, sampled once and held for the whole step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump went down this step
    pub jump_pressed: bool,
    /// Jump is down
    pub jump_held: bool,
    /// Jump came up this step
    pub jump_released: bool,
}

/// Derives jump edges from raw held state
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSampler {
    prev_jump: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, move_left: bool, move_right: bool, jump: bool) -> TickInput {
        let input = TickInput {
            move_left,
            move_right,
            jump_pressed: jump && !self.prev_jump,
            jump_held: jump,
            jump_released: !jump && self.prev_jump,
        };
        self.prev_jump = jump;
        input
    }
}

/// Advance the simulation by one fixed step
pub fn step(state: &mut SimulationState, input: &TickInput, tuning: &Tuning) -> Snapshot {
    if state.complete {
        return state.snapshot(Vec::new());
    }

    state.frame += 1;
    let mut events = Vec::new();

    let stunned = state.is_stunned();
    let input = if stunned {
        state.stun_steps -= 1;
        TickInput::default()
    } else {
        *input
    };

    let body = &mut state.body;

    body.vel.x = if stunned {
        0.0
    } else {
        match tuning.movement {
            MovementMode::Manual => {
                (input.move_right as i8 - input.move_left as i8) as f32 * tuning.move_speed
            }
            MovementMode::AutoRun => tuning.move_speed,
        }
    };

    if jump::apply_jump_input(body, &input, tuning) {
        events.push(GameEvent::Jumped);
    }
    jump::integrate_vertical(body, tuning);

    resolve_x(body, &state.level.blocks);
    resolve_y(body, &state.level.blocks);
    if jump::settle_phase(body) {
        events.push(GameEvent::Landed);
    }

    if state.level.finish_reached(&body.rect()) {
        log::debug!("Level complete at frame {} (x = {})", state.frame, body.pos.x);
        state.complete = true;
        events.push(GameEvent::LevelComplete);
        return state.snapshot(events);
    }

    let outcome = run_interactions(
        body,
        &mut state.level.interactables,
        &input,
        tuning,
        &mut events,
    );

    if outcome.hazard {
        log::debug!("Hazard hit at frame {}, resetting to start", state.frame);
        state.reset_body();
        state.stun_steps = tuning.stun_steps;
        return state.snapshot(events);
    }

    update_rotation(&mut state.body, tuning);
    state.snapshot(events)
}

/// By-value form of `step`
pub fn advance(
    mut state: SimulationState,
    input: &TickInput,
    tuning: &Tuning,
) -> (SimulationState, Snapshot) {
    let snapshot = step(&mut state, input, tuning);
    (state, snapshot)
}

/// Spin while airborne, against the direction of travel
fn update_rotation(body: &mut KinematicBody, tuning: &Tuning) {
    if body.grounded {
        return;
    }
    if body.vel.x > 0.0 {
        body.rotation -= tuning.rotation_speed;
    } else if body.vel.x < 0.0 {
        body.rotation += tuning.rotation_speed;
    }
    body.rotation = normalize_degrees(body.rotation);
}
