//! Level record text format
//!
//! ```text
//! # comment
//! START,50,300
//! 0,400,900,40,green        solid block
//! 349,342,12,18,red         lethal block
//! ORB,260,340,12            orb (add ",flip" to invert gravity)
//! PAD,200,388,40,12,flip    pad
//! ZONE,600,120,80,280       gravity flip zone
//! FINISH,1000
//! ```

use std::fmt::Write as _;
use std::path::Path;

use glam::Vec2;

use crate::consts::{BLOCK_SIZE, DEFAULT_FINISH_X, PLAYER_SIZE};
use crate::error::{InvalidGeometryError, LevelFileError, LevelLoadError};
use crate::sim::geom::{Rect, Region};
use crate::sim::level::{Interactable, InteractableKind, Level, StaticBlock};
use crate::tuning::Tuning;

const FLIP_FLAG: &str = "flip";

/// Defaults applied to whatever the file leaves out
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    pub default_finish_x: f32,
    pub default_start: Vec2,
    /// Editor files leave the ground implicit; when set, a ground block at
    /// this height is registered ahead of the file's blocks.
    pub ground_y: Option<f32>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_finish_x: DEFAULT_FINISH_X,
            default_start: Vec2::new(150.0, 300.0),
            ground_y: None,
        }
    }
}

impl ParseOptions {
    /// Options for levels authored in the side-scrolling editor (ground at y = 500)
    pub fn editor() -> Self {
        let ground_y = 500.0;
        Self {
            default_start: Vec2::new(150.0, ground_y - PLAYER_SIZE),
            ground_y: Some(ground_y),
            ..Self::default()
        }
    }

    /// Take the finish fallback from tuning
    pub fn with_tuning(mut self, tuning: &Tuning) -> Self {
        self.default_finish_x = tuning.default_finish_x;
        self
    }
}

/// A parsed level plus everything that was wrong with the source
#[derive(Debug, Clone)]
pub struct LevelLoad {
    pub level: Level,
    /// Records skipped as malformed
    pub skipped: Vec<LevelLoadError>,
    /// Interpenetrating blocks; kept as loaded, not corrected
    pub overlaps: Vec<InvalidGeometryError>,
}

impl LevelLoad {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.overlaps.is_empty()
    }
}

/// Parse level records. Never fails: bad lines land in `skipped`.
pub fn parse_level(text: &str, options: &ParseOptions) -> LevelLoad {
    let mut level = Level::new(options.default_start, options.default_finish_x);
    let mut skipped = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(err) = parse_record(idx + 1, line, &mut level) {
            log::warn!("Skipping level record: {err}");
            skipped.push(err);
        }
    }

    if let Some(ground_y) = options.ground_y {
        let right = level
            .blocks
            .iter()
            .map(|b| b.rect.right())
            .fold(level.finish_x, f32::max);
        level
            .blocks
            .insert(0, StaticBlock::new(0.0, ground_y, right + BLOCK_SIZE * 10.0, BLOCK_SIZE));
    }

    let overlaps = level.overlapping_blocks();
    for overlap in &overlaps {
        log::warn!("Invalid geometry: {overlap}");
    }

    LevelLoad {
        level,
        skipped,
        overlaps,
    }
}

/// Read and parse a level file
pub fn load_level_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<LevelLoad, LevelFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LevelFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let load = parse_level(&text, options);
    log::info!(
        "Loaded level {}: {} blocks, {} interactables, finish at {} ({} skipped)",
        path.display(),
        load.level.blocks.len(),
        load.level.interactables.len(),
        load.level.finish_x,
        load.skipped.len()
    );
    Ok(load)
}

fn parse_record(line: usize, text: &str, level: &mut Level) -> Result<(), LevelLoadError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();

    match fields[0].to_ascii_uppercase().as_str() {
        "FINISH" => {
            expect_fields(line, "FINISH", &fields, 2, 2)?;
            level.finish_x = number(line, &fields, 1)?;
        }
        "START" => {
            expect_fields(line, "START", &fields, 3, 3)?;
            level.start = Vec2::new(number(line, &fields, 1)?, number(line, &fields, 2)?);
        }
        "ORB" => {
            expect_fields(line, "ORB", &fields, 4, 5)?;
            let center = Vec2::new(number(line, &fields, 1)?, number(line, &fields, 2)?);
            let radius = number(line, &fields, 3)?;
            if radius <= 0.0 {
                return Err(LevelLoadError::NonPositiveSize { line });
            }
            let flips = flag(line, &fields, 4)?;
            level.push_interactable(Interactable::orb(center, radius, flips));
        }
        "PAD" => {
            expect_fields(line, "PAD", &fields, 5, 6)?;
            let rect = rect(line, &fields, 1)?;
            let flips = flag(line, &fields, 5)?;
            level.push_interactable(Interactable::pad(rect, flips));
        }
        "ZONE" => {
            expect_fields(line, "ZONE", &fields, 5, 5)?;
            level.push_interactable(Interactable::gravity_zone(rect(line, &fields, 1)?));
        }
        _ => {
            expect_fields(line, "block", &fields, 5, 5)?;
            let rect = rect(line, &fields, 0)?;
            match fields[4].to_ascii_lowercase().as_str() {
                "green" => level.push_block(StaticBlock { rect }),
                "red" => level.push_interactable(Interactable::hazard(rect)),
                other => {
                    return Err(LevelLoadError::UnknownKind {
                        line,
                        kind: other.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn expect_fields(
    line: usize,
    kind: &'static str,
    fields: &[&str],
    min: usize,
    max: usize,
) -> Result<(), LevelLoadError> {
    if fields.len() < min || fields.len() > max {
        return Err(LevelLoadError::FieldCount {
            line,
            kind,
            expected: min,
            found: fields.len(),
        });
    }
    Ok(())
}

fn number(line: usize, fields: &[&str], field: usize) -> Result<f32, LevelLoadError> {
    let value = fields[field];
    match value.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(LevelLoadError::BadNumber {
            line,
            field,
            value: value.to_string(),
        }),
    }
}

fn rect(line: usize, fields: &[&str], first: usize) -> Result<Rect, LevelLoadError> {
    let r = Rect::new(
        number(line, fields, first)?,
        number(line, fields, first + 1)?,
        number(line, fields, first + 2)?,
        number(line, fields, first + 3)?,
    );
    if r.w <= 0.0 || r.h <= 0.0 {
        return Err(LevelLoadError::NonPositiveSize { line });
    }
    Ok(r)
}

fn flag(line: usize, fields: &[&str], field: usize) -> Result<bool, LevelLoadError> {
    match fields.get(field) {
        None => Ok(false),
        Some(value) if value.eq_ignore_ascii_case(FLIP_FLAG) => Ok(true),
        Some(value) => Err(LevelLoadError::UnknownKind {
            line,
            kind: value.to_string(),
        }),
    }
}

/// Write a level back out as records. Finish markers other than the finish
/// line have no record form and are dropped.
pub fn format_records(level: &Level) -> String {
    let mut out = String::from("# gravity-dash level\n");
    let _ = writeln!(out, "START,{},{}", level.start.x, level.start.y);

    for block in &level.blocks {
        let r = block.rect;
        let _ = writeln!(out, "{},{},{},{},green", r.x, r.y, r.w, r.h);
    }

    for interactable in &level.interactables {
        let b = interactable.region.bounds();
        let flip = |flips: bool| if flips { ",flip" } else { "" };
        match (interactable.kind, interactable.region) {
            (InteractableKind::Hazard, _) => {
                let _ = writeln!(out, "{},{},{},{},red", b.x, b.y, b.w, b.h);
            }
            (InteractableKind::Orb { flips_gravity }, Region::Circle { center, radius }) => {
                let _ = writeln!(
                    out,
                    "ORB,{},{},{}{}",
                    center.x,
                    center.y,
                    radius,
                    flip(flips_gravity)
                );
            }
            (InteractableKind::Orb { flips_gravity }, Region::Rect(_)) => {
                // Rect orbs round-trip as their inscribed circle
                let _ = writeln!(
                    out,
                    "ORB,{},{},{}{}",
                    b.center().x,
                    b.center().y,
                    b.w.min(b.h) / 2.0,
                    flip(flips_gravity)
                );
            }
            (InteractableKind::Pad { flips_gravity }, _) => {
                let _ = writeln!(
                    out,
                    "PAD,{},{},{},{}{}",
                    b.x,
                    b.y,
                    b.w,
                    b.h,
                    flip(flips_gravity)
                );
            }
            (InteractableKind::GravityZone, _) => {
                let _ = writeln!(out, "ZONE,{},{},{},{}", b.x, b.y, b.w, b.h);
            }
            (InteractableKind::Finish, _) => {}
        }
    }

    let _ = writeln!(out, "FINISH,{}", level.finish_x);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITOR_FILE: &str = "\
# Level created with Geometry Dash Editor
400,440,80,60,green
700,440,20,60,red
FINISH,1600
";

    #[test]
    fn test_parse_editor_file() {
        let load = parse_level(EDITOR_FILE, &ParseOptions::default());
        assert!(load.is_clean());
        assert_eq!(load.level.blocks, vec![StaticBlock::new(400.0, 440.0, 80.0, 60.0)]);
        assert_eq!(load.level.interactables.len(), 1);
        assert_eq!(load.level.interactables[0].kind, InteractableKind::Hazard);
        assert_eq!(load.level.finish_x, 1600.0);
    }

    #[test]
    fn test_missing_finish_uses_fallback() {
        let load = parse_level("0,400,900,40,green\n", &ParseOptions::default());
        assert_eq!(load.level.finish_x, 1000.0);
    }

    #[test]
    fn test_tuned_finish_fallback() {
        let tuning = Tuning::from_json_str(r#"{ "default_finish_x": 500.0 }"#).unwrap();
        let options = ParseOptions::editor().with_tuning(&tuning);

        let load = parse_level("0,400,900,40,green\n", &options);
        assert_eq!(load.level.finish_x, 500.0);
        // An explicit FINISH record still wins
        let load = parse_level("0,400,900,40,green\nFINISH,1600\n", &options);
        assert_eq!(load.level.finish_x, 1600.0);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let text = "\
0,400,900,40,green
1,2,3
a,2,3,4,green
5,6,7,8,blue
10,20,0,5,green
FINISH
ORB,1,2,3,sideways
600,300,40,40,red
";
        let load = parse_level(text, &ParseOptions::default());
        assert_eq!(load.level.blocks.len(), 1);
        assert_eq!(load.level.interactables.len(), 1);
        assert_eq!(load.skipped.len(), 6);
        assert_eq!(
            load.skipped[0],
            LevelLoadError::FieldCount {
                line: 2,
                kind: "block",
                expected: 5,
                found: 3
            }
        );
        assert!(matches!(load.skipped[1], LevelLoadError::BadNumber { line: 3, field: 0, .. }));
        assert!(matches!(
            &load.skipped[2],
            LevelLoadError::UnknownKind { line: 4, kind } if kind == "blue"
        ));
        assert_eq!(load.skipped[3], LevelLoadError::NonPositiveSize { line: 5 });
        assert!(matches!(load.skipped[4], LevelLoadError::FieldCount { line: 6, .. }));
        assert!(matches!(load.skipped[5], LevelLoadError::UnknownKind { line: 7, .. }));
    }

    #[test]
    fn test_supplemental_records() {
        let text = "\
START,50,300
ORB,120,280,12,flip
pad,200,388,40,12
ZONE,600,120,80,280
FINISH,900.5
";
        let load = parse_level(text, &ParseOptions::default());
        assert!(load.is_clean());
        let level = &load.level;
        assert_eq!(level.start, Vec2::new(50.0, 300.0));
        assert_eq!(level.finish_x, 900.5);
        assert_eq!(
            level.interactables[0].kind,
            InteractableKind::Orb { flips_gravity: true }
        );
        assert_eq!(
            level.interactables[1].kind,
            InteractableKind::Pad { flips_gravity: false }
        );
        assert_eq!(level.interactables[2].kind, InteractableKind::GravityZone);
    }

    #[test]
    fn test_overlaps_reported_not_corrected() {
        let text = "0,400,900,40,green\n100,380,40,40,green\n";
        let load = parse_level(text, &ParseOptions::default());
        assert_eq!(load.level.blocks.len(), 2);
        assert_eq!(load.overlaps, vec![InvalidGeometryError { first: 0, second: 1 }]);
        assert!(!load.is_clean());
    }

    #[test]
    fn test_editor_options_add_ground_first() {
        let load = parse_level(EDITOR_FILE, &ParseOptions::editor());
        assert!(load.overlaps.is_empty());
        let ground = load.level.blocks[0].rect;
        assert_eq!(ground.y, 500.0);
        assert!(ground.right() > 1600.0);
        assert_eq!(load.level.start, Vec2::new(150.0, 460.0));
    }

    #[test]
    fn test_testing_room_round_trips() {
        let level = Level::testing_room();
        let text = format_records(&level);
        let load = parse_level(&text, &ParseOptions::default());
        assert!(load.is_clean());
        assert_eq!(load.level, level);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err =
            load_level_file("/definitely/not/here.txt", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, LevelFileError::Io { .. }));
    }
}
