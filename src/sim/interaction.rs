//! Interactable triggers: orbs, pads, gravity zones, hazards
//!
//! Evaluated once per step against the post-collision footprint, in registry
//! order. Re-armable triggers fire once per overlap episode: `used` is set on
//! trigger and forced back to false on any step the body is clear of the
//! region, whether or not it fired.

use super::jump::ballistic_phase;
use super::level::{Interactable, InteractableKind};
use super::state::{GameEvent, KinematicBody};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// What the interaction pass did to the body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionOutcome {
    /// A hazard was touched; the caller must reset the body
    pub hazard: bool,
    pub bounces: u32,
    pub gravity_flips: u32,
}

/// Run every interactable against the body.
///
/// Stops at the first hazard: the body is about to be reset, so later
/// triggers are not evaluated this step.
pub fn run_interactions(
    body: &mut KinematicBody,
    interactables: &mut [Interactable],
    input: &TickInput,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> InteractionOutcome {
    let mut outcome = InteractionOutcome::default();
    let footprint = body.rect();

    for (index, interactable) in interactables.iter_mut().enumerate() {
        let overlapping = interactable.region.overlaps(&footprint);

        match interactable.kind {
            InteractableKind::Orb { .. } | InteractableKind::Pad { .. } => {
                // Orbs need jump held, pads fire on contact
                let (force, armed) = match interactable.kind {
                    InteractableKind::Orb { .. } => (tuning.orb_bounce, input.jump_held),
                    _ => (tuning.pad_bounce, true),
                };
                if armed && overlapping && !interactable.used {
                    let flips_gravity = interactable.kind.flips_gravity();
                    bounce(body, force, flips_gravity, events);
                    events.push(GameEvent::Bounced { index });
                    interactable.used = true;
                    outcome.bounces += 1;
                    outcome.gravity_flips += flips_gravity as u32;
                }
            }
            InteractableKind::GravityZone => {
                if overlapping && !interactable.used {
                    flip(body, events);
                    body.end_curve();
                    body.jump_phase = ballistic_phase(body);
                    interactable.used = true;
                    outcome.gravity_flips += 1;
                }
            }
            InteractableKind::Hazard => {
                if overlapping {
                    events.push(GameEvent::HazardHit);
                    outcome.hazard = true;
                    break;
                }
            }
            // Finish is a terminal check done before interactions
            InteractableKind::Finish => {}
        }

        if !overlapping && interactable.kind.is_rearmable() {
            interactable.used = false;
        }
    }

    outcome
}

/// Launch against gravity, optionally inverting it afterward
fn bounce(
    body: &mut KinematicBody,
    force: f32,
    flips_gravity: bool,
    events: &mut Vec<GameEvent>,
) {
    body.vel.y = -force * body.gravity.sign();
    if flips_gravity {
        flip(body, events);
    }
    body.end_curve();
    body.jump_phase = ballistic_phase(body);
}

fn flip(body: &mut KinematicBody, events: &mut Vec<GameEvent>) {
    body.flip_gravity();
    events.push(GameEvent::GravityFlipped);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Rect;
    use crate::sim::state::{GravityDir, JumpPhase, RiseCurve};
    use glam::Vec2;
    use proptest::prelude::*;

    fn held() -> TickInput {
        TickInput {
            jump_held: true,
            ..Default::default()
        }
    }

    fn body_at(x: f32, y: f32) -> KinematicBody {
        KinematicBody::new(Vec2::new(x, y))
    }

    /// One interaction pass with default tuning
    fn pass(
        body: &mut KinematicBody,
        list: &mut [Interactable],
        input: &TickInput,
        events: &mut Vec<GameEvent>,
    ) -> InteractionOutcome {
        run_interactions(body, list, input, &Tuning::default(), events)
    }

    #[test]
    fn test_orb_needs_jump_held() {
        let mut orbs = vec![Interactable::orb(Vec2::new(120.0, 120.0), 12.0, false)];
        let mut body = body_at(100.0, 100.0);
        let mut events = Vec::new();

        let out = pass(&mut body, &mut orbs, &TickInput::default(), &mut events);
        assert_eq!(out.bounces, 0);
        assert!(!orbs[0].used);

        let out = pass(&mut body, &mut orbs, &held(), &mut events);
        assert_eq!(out.bounces, 1);
        assert_eq!(body.vel.y, -12.0);
        assert!(orbs[0].used);
        assert_eq!(events, vec![GameEvent::Bounced { index: 0 }]);
    }

    #[test]
    fn test_orb_one_trigger_per_episode() {
        let mut orbs = vec![Interactable::orb(Vec2::new(120.0, 120.0), 12.0, false)];
        let mut events = Vec::new();
        let mut inside = body_at(100.0, 100.0);
        let mut outside = body_at(300.0, 100.0);

        assert_eq!(pass(&mut inside, &mut orbs, &held(), &mut events).bounces, 1);
        assert_eq!(pass(&mut inside, &mut orbs, &held(), &mut events).bounces, 0);
        assert_eq!(pass(&mut outside, &mut orbs, &held(), &mut events).bounces, 0);
        assert!(!orbs[0].used);
        assert_eq!(pass(&mut inside, &mut orbs, &held(), &mut events).bounces, 1);
    }

    #[test]
    fn test_flip_pad_while_falling() {
        let mut pads = vec![Interactable::pad(Rect::new(100.0, 130.0, 40.0, 12.0), true)];
        let mut body = body_at(100.0, 100.0);
        body.vel.y = 4.0;
        body.jump_phase = JumpPhase::Falling;
        let mut events = Vec::new();

        let out = pass(&mut body, &mut pads, &TickInput::default(), &mut events);
        assert_eq!(out.gravity_flips, 1);
        assert_eq!(body.gravity, GravityDir::Up);
        assert_eq!(body.vel.y, -14.0);
        // Now heading the way the inverted gravity pulls
        assert_eq!(body.jump_phase, JumpPhase::Falling);
        assert_eq!(
            events,
            vec![GameEvent::GravityFlipped, GameEvent::Bounced { index: 0 }]
        );
    }

    #[test]
    fn test_bounce_cancels_rise_curve() {
        let mut pads = vec![Interactable::pad(Rect::new(100.0, 130.0, 40.0, 12.0), false)];
        let mut body = body_at(100.0, 100.0);
        body.rise = Some(RiseCurve {
            origin_y: 200.0,
            amplitude: 120.0,
        });
        body.jump_elapsed = 2.0;
        body.jump_phase = JumpPhase::Rising;

        pass(&mut body, &mut pads, &TickInput::default(), &mut Vec::new());
        assert!(body.rise.is_none());
        assert_eq!(body.vel.y, -14.0);
        assert_eq!(body.jump_phase, JumpPhase::Rising);
    }

    #[test]
    fn test_gravity_zone_flips_once_and_keeps_velocity() {
        let mut zones = vec![Interactable::gravity_zone(Rect::new(0.0, 0.0, 200.0, 200.0))];
        let mut body = body_at(50.0, 50.0);
        body.vel = Vec2::new(5.0, 3.0);
        let mut events = Vec::new();

        pass(&mut body, &mut zones, &TickInput::default(), &mut events);
        pass(&mut body, &mut zones, &TickInput::default(), &mut events);
        assert_eq!(body.gravity, GravityDir::Up);
        assert_eq!(body.vel, Vec2::new(5.0, 3.0));
        assert_eq!(events, vec![GameEvent::GravityFlipped]);
    }

    #[test]
    fn test_hazard_stops_the_pass() {
        let mut list = vec![
            Interactable::hazard(Rect::new(90.0, 90.0, 20.0, 20.0)),
            Interactable::pad(Rect::new(100.0, 100.0, 40.0, 12.0), false),
        ];
        let mut body = body_at(100.0, 100.0);
        let mut events = Vec::new();

        let out = pass(&mut body, &mut list, &TickInput::default(), &mut events);
        assert!(out.hazard);
        assert_eq!(out.bounces, 0);
        assert!(!list[1].used);
        assert_eq!(events, vec![GameEvent::HazardHit]);
    }

    proptest! {
        #[test]
        fn prop_pad_fires_once_per_overlap_episode(
            path in proptest::collection::vec(any::<bool>(), 1..64)
        ) {
                let mut pads = vec![Interactable::pad(Rect::new(100.0, 100.0, 40.0, 12.0), false)];
            let mut fired = 0;
            let mut episodes = 0;
            let mut was_inside = false;

            for inside in path {
                let mut body = if inside { body_at(100.0, 80.0) } else { body_at(400.0, 80.0) };
                if inside && !was_inside {
                    episodes += 1;
                }
                was_inside = inside;
                let input = TickInput::default();
                fired += pass(&mut body, &mut pads, &input, &mut Vec::new()).bounces;
            }
            prop_assert_eq!(fired, episodes);
        }
    }
}
