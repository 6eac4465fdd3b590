//! Seeded obstacle course generation
//!
//! Lays out a runner course the way the endless mode spawns obstacles: a gap
//! of 60..=120 steps of scrolling between obstacles, each one either a green
//! platform of random width or a red spike block. The random source is passed
//! in, so a seed fully determines the course.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BLOCK_SIZE, PLAYER_SIZE};
use crate::sim::geom::Rect;
use crate::sim::level::{Interactable, Level, StaticBlock};

/// Platform widths to pick from
pub const PLATFORM_WIDTHS: [f32; 3] = [20.0, 80.0, 120.0];

/// Course layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseParams {
    pub obstacle_count: usize,
    /// Horizontal distance covered per step
    pub scroll_speed: f32,
    pub min_gap_steps: u32,
    pub max_gap_steps: u32,
    pub platform_chance: f64,
    pub ground_y: f32,
    pub obstacle_height: f32,
    pub spike_width: f32,
    pub start_x: f32,
    /// Free run before the first obstacle
    pub lead_in: f32,
    /// Free run after the last obstacle before the finish
    pub run_out: f32,
}

impl Default for CourseParams {
    fn default() -> Self {
        Self {
            obstacle_count: 20,
            scroll_speed: 5.0,
            min_gap_steps: 60,
            max_gap_steps: 120,
            platform_chance: 0.5,
            ground_y: 500.0,
            obstacle_height: 60.0,
            spike_width: 20.0,
            start_x: 150.0,
            lead_in: 650.0,
            run_out: 300.0,
        }
    }
}

/// Generate a course from a seed
pub fn generate_course(seed: u64, params: &CourseParams) -> Level {
    let mut rng = Pcg32::seed_from_u64(seed);
    let level = generate_course_with(&mut rng, params);
    log::info!(
        "Generated course (seed {}): {} obstacles, finish at {}",
        seed,
        params.obstacle_count,
        level.finish_x
    );
    level
}

/// Generate a course from any random source
pub fn generate_course_with<R: Rng>(rng: &mut R, params: &CourseParams) -> Level {
    let top = params.ground_y - params.obstacle_height;
    let mut level = Level::new(
        Vec2::new(params.start_x, params.ground_y - PLAYER_SIZE),
        0.0,
    );

    let mut x = params.start_x + params.lead_in;
    let mut obstacles = Vec::with_capacity(params.obstacle_count);
    for _ in 0..params.obstacle_count {
        let gap_steps = rng.random_range(params.min_gap_steps..=params.max_gap_steps);
        x += gap_steps as f32 * params.scroll_speed;

        if rng.random_bool(params.platform_chance) {
            let width = PLATFORM_WIDTHS[rng.random_range(0..PLATFORM_WIDTHS.len())];
            obstacles.push(Obstacle::Platform(Rect::new(x, top, width, params.obstacle_height)));
            x += width;
        } else {
            obstacles.push(Obstacle::Spike(Rect::new(
                x,
                top,
                params.spike_width,
                params.obstacle_height,
            )));
            x += params.spike_width;
        }
    }

    let finish_x = x + params.run_out;
    level.finish_x = finish_x;
    level.push_block(StaticBlock::new(
        0.0,
        params.ground_y,
        finish_x + BLOCK_SIZE * 10.0,
        BLOCK_SIZE,
    ));
    for obstacle in obstacles {
        match obstacle {
            Obstacle::Platform(rect) => level.push_block(StaticBlock { rect }),
            Obstacle::Spike(rect) => level.push_interactable(Interactable::hazard(rect)),
        }
    }

    level
}

enum Obstacle {
    Platform(Rect),
    Spike(Rect),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::InteractableKind;

    #[test]
    fn test_same_seed_same_course() {
        let params = CourseParams::default();
        assert_eq!(generate_course(7, &params), generate_course(7, &params));
        assert_ne!(generate_course(7, &params), generate_course(8, &params));
    }

    #[test]
    fn test_course_shape() {
        let params = CourseParams::default();
        let level = generate_course(42, &params);

        let platforms = level.blocks.len() - 1;
        let spikes = level
            .interactables
            .iter()
            .filter(|i| i.kind == InteractableKind::Hazard)
            .count();
        assert_eq!(platforms + spikes, params.obstacle_count);
        assert!(level.validate().is_ok());

        // Obstacles sit on the ground, spaced by at least the minimum gap
        let min_gap = params.min_gap_steps as f32 * params.scroll_speed;
        let mut xs: Vec<(f32, f32)> = level.blocks[1..]
            .iter()
            .map(|b| (b.rect.left(), b.rect.right()))
            .chain(
                level
                    .interactables
                    .iter()
                    .map(|i| (i.region.bounds().left(), i.region.bounds().right())),
            )
            .collect();
        xs.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in xs.windows(2) {
            assert!(pair[1].0 - pair[0].1 >= min_gap);
        }
        assert!(level.finish_x > xs.last().unwrap().1);
        for block in &level.blocks[1..] {
            assert_eq!(block.rect.bottom(), params.ground_y);
            assert!(PLATFORM_WIDTHS.contains(&block.rect.w));
        }
    }

    #[test]
    fn test_injected_rng() {
        let params = CourseParams {
            obstacle_count: 5,
            platform_chance: 1.0,
            ..CourseParams::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let level = generate_course_with(&mut rng, &params);
        assert_eq!(level.blocks.len(), 6);
        assert!(level.interactables.is_empty());
        assert_eq!(level.start, Vec2::new(150.0, 460.0));
    }
}
