//! Fixed level files
//!
//! A level is a JSON record:
//!
//! ```json
//! {
//!     "obstacles": [{ "x": 400, "y": 85, "w": 10, "h": 60, "type": "vertical", "block": 1 }],
//!     "targets": [{ "x": 440, "y": 110, "w": 46 }],
//!     "ducks": 5,
//!     "next_level": "level2"
//! }
//! ```
//!
//! Targets are circles centred on `(x, y)` with diameter `w`. Obstacles are
//! static in the first level and breakable planks everywhere else, unless the
//! file sets `"breakable"` explicitly.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, LoadFailureReason};
use crate::sim::state::{GameState, PlankKind, Rect};

/// One obstacle entry; `type` and `block` only matter for planks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(rename = "type", default)]
    pub kind: PlankKind,
    #[serde(default)]
    pub block: u32,
}

impl ObstacleSpec {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
}

/// A hand-authored level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    pub targets: Vec<TargetSpec>,
    /// Starting duck supply
    pub ducks: u32,
    #[serde(default)]
    pub next_level: Option<String>,
    /// Overrides whether obstacles are breakable planks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakable: Option<bool>,
}

impl LevelFile {
    /// Parse and validate a level
    pub fn from_json(id: &str, json: &str) -> Result<Self, GameError> {
        let level: LevelFile = serde_json::from_str(json)
            .map_err(|e| load_error(id, LoadFailureReason::Malformed(e.to_string())))?;
        level
            .validate()
            .map_err(|msg| load_error(id, LoadFailureReason::Malformed(msg.to_string())))?;
        Ok(level)
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.ducks == 0 {
            return Err("a level needs at least one duck");
        }
        let rects_ok = self.obstacles.iter().all(|o| {
            [o.x, o.y, o.w, o.h].iter().all(|v| v.is_finite()) && o.w > 0.0 && o.h > 0.0
        });
        if !rects_ok {
            return Err("obstacles need finite coordinates and positive size");
        }
        let targets_ok = self
            .targets
            .iter()
            .all(|t| [t.x, t.y, t.w].iter().all(|v| v.is_finite()) && t.w > 0.0);
        if !targets_ok {
            return Err("targets need finite coordinates and positive size");
        }
        Ok(())
    }

    /// Whether obstacles load as breakable planks for level `id`
    pub fn obstacles_breakable(&self, id: &str, first_level: &str) -> bool {
        self.breakable.unwrap_or(id != first_level)
    }

    /// Replace the field contents with this layout
    pub fn populate(&self, id: &str, state: &mut GameState) {
        let breakable = self.obstacles_breakable(id, &state.tuning.first_level);
        state.clear_field();

        for o in &self.obstacles {
            if breakable {
                state.add_plank(o.rect(), o.kind, o.block);
            } else {
                state.add_obstacle(o.rect());
            }
        }
        for t in &self.targets {
            state.add_target(Vec2::new(t.x, t.y), t.w);
        }
    }
}

fn load_error(id: &str, reason: LoadFailureReason) -> GameError {
    GameError::LevelLoad {
        level: id.to_string(),
        reason,
    }
}

/// Where fixed levels come from
pub trait LevelSource {
    fn load(&self, id: &str) -> Result<LevelFile, GameError>;
}

impl<S: LevelSource + ?Sized> LevelSource for Box<S> {
    fn load(&self, id: &str) -> Result<LevelFile, GameError> {
        (**self).load(id)
    }
}

/// Levels read from `<root>/<id>.json`
#[derive(Debug, Clone)]
pub struct LevelDir {
    root: PathBuf,
}

impl LevelDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LevelSource for LevelDir {
    fn load(&self, id: &str) -> Result<LevelFile, GameError> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(load_error(id, LoadFailureReason::Missing));
        }

        let path = self.root.join(format!("{id}.json"));
        let json = fs::read_to_string(&path).map_err(|e| {
            let reason = if e.kind() == io::ErrorKind::NotFound {
                LoadFailureReason::Missing
            } else {
                LoadFailureReason::Io(e.to_string())
            };
            load_error(id, reason)
        })?;

        log::info!("Loaded level {} from {}", id, path.display());
        LevelFile::from_json(id, &json)
    }
}

static BUILTIN: [(&str, &str); 2] = [
    ("level1", include_str!("../levels/level1.json")),
    ("level2", include_str!("../levels/level2.json")),
];

/// The levels shipped with the game, compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLevels;

impl BuiltinLevels {
    pub fn ids() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(id, _)| *id)
    }
}

impl LevelSource for BuiltinLevels {
    fn load(&self, id: &str) -> Result<LevelFile, GameError> {
        let (_, json) = BUILTIN
            .iter()
            .find(|(name, _)| *name == id)
            .ok_or_else(|| load_error(id, LoadFailureReason::Missing))?;
        LevelFile::from_json(id, json)
    }
}

/// Levels held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLevels {
    levels: BTreeMap<String, LevelFile>,
}

impl MemoryLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<String>, level: LevelFile) -> Self {
        self.insert(id, level);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, level: LevelFile) {
        self.levels.insert(id.into(), level);
    }
}

impl LevelSource for MemoryLevels {
    fn load(&self, id: &str) -> Result<LevelFile, GameError> {
        self.levels
            .get(id)
            .cloned()
            .ok_or_else(|| load_error(id, LoadFailureReason::Missing))
    }
}
