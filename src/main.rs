//! Gravity Dash headless runner
//!
//! Plays a level with a scripted input pattern and prints the final snapshot.
//!
//! ```text
//! gravity-dash [LEVEL_FILE | --course SEED] [STEPS]
//! ```
//!
//! `GRAVITY_DASH_TUNING` may name a JSON file of tuning overrides and
//! `GRAVITY_DASH_JUMP` (`impulse`, `arc`, `charge`) picks the jump model.

use std::error::Error;
use std::path::Path;

use gravity_dash::consts::SIM_HZ;
use gravity_dash::course::{CourseParams, generate_course};
use gravity_dash::persistence::{ParseOptions, load_level_file};
use gravity_dash::sim::{GameEvent, InputSampler, Level, SimulationState, step};
use gravity_dash::{JumpModel, Tuning};

const TUNING_ENV_VAR: &str = "GRAVITY_DASH_TUNING";
const JUMP_ENV_VAR: &str = "GRAVITY_DASH_JUMP";
const DEFAULT_STEPS: u64 = SIM_HZ as u64 * 30;

/// Jump is held for this many steps out of every cycle
const JUMP_CYCLE: u64 = 45;
const JUMP_HOLD: u64 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Gravity Dash (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut tuning = match std::env::var(TUNING_ENV_VAR) {
        Ok(path) => Tuning::load(path)?,
        Err(_) => Tuning::default(),
    };
    if let Ok(name) = std::env::var(JUMP_ENV_VAR) {
        tuning.jump_model = JumpModel::from_str(&name).ok_or("unknown jump model")?;
    }
    log::info!("Jump model: {}", tuning.jump_model.as_str());

    let (level, rest) = match args.first().map(String::as_str) {
        Some("--course") => {
            let seed = args.get(1).ok_or("--course needs a seed")?.parse::<u64>()?;
            (generate_course(seed, &CourseParams::default()), &args[2..])
        }
        Some(path) if is_level_path(path) => {
            let options = ParseOptions::editor().with_tuning(&tuning);
            let load = load_level_file(path, &options)?;
            if !load.is_clean() {
                log::warn!(
                    "{} records skipped, {} overlapping block pairs",
                    load.skipped.len(),
                    load.overlaps.len()
                );
            }
            (load.level, &args[1..])
        }
        _ => (Level::testing_room(), &args[..]),
    };
    let steps = match rest.first() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_STEPS,
    };

    let mut state = SimulationState::new(level);
    let mut sampler = InputSampler::new();
    let mut hazards = 0u32;
    let mut last = state.snapshot(Vec::new());

    for n in 0..steps {
        let jump = n % JUMP_CYCLE < JUMP_HOLD;
        let input = sampler.sample(false, true, jump);
        last = step(&mut state, &input, &tuning);

        for event in &last.events {
            match event {
                GameEvent::HazardHit => {
                    hazards += 1;
                    log::info!("Step {}: hazard, back to start", last.frame);
                }
                GameEvent::LevelComplete => log::info!("Step {}: level complete", last.frame),
                GameEvent::GravityFlipped => {
                    log::debug!("Step {}: gravity now {:?}", last.frame, last.gravity)
                }
                _ => {}
            }
        }
        if last.complete {
            break;
        }
    }

    log::info!(
        "Finished after {} steps ({} hazard resets, complete: {})",
        last.frame,
        hazards,
        last.complete
    );
    println!("{}", serde_json::to_string_pretty(&last)?);
    Ok(())
}

/// An existing file wins over a bare step count
fn is_level_path(arg: &str) -> bool {
    Path::new(arg).exists() || arg.parse::<u64>().is_err()
}
