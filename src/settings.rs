//! Data-driven tuning
//!
//! Every physics constant and layout band the simulation reads. Loaded from a
//! JSON file where any omitted field keeps its default.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub win_width: f32,
    pub win_height: f32,
    pub ground_level: f32,

    // === Sling ===
    /// Sling anchor position
    pub anchor: Vec2,
    /// Maximum pull distance from the anchor
    pub launch_radius: f32,
    /// Pull distance to launch speed (per tick)
    pub force_factor: f32,

    // === Physics ===
    /// Velocity decrement applied once per tick
    pub gravity: f32,
    /// Step cap when settling a random round's boxes
    pub max_settle_steps: u32,

    // === Random rounds ===
    pub round_ducks: u32,
    pub total_rounds: u32,
    pub round_obstacles: usize,
    pub round_targets: usize,
    pub obstacle_size: Vec2,
    pub target_size: f32,
    pub layout_min_x: f32,
    /// Lowest spawn height; leaves headroom for stacking
    pub layout_min_height: f32,

    // === Fixed levels ===
    /// Level loaded by "play fixed"; its obstacles are static unless the file says otherwise
    pub first_level: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            win_width: WIN_WIDTH,
            win_height: WIN_HEIGHT,
            ground_level: GROUND_LEVEL,

            anchor: Vec2::new(START_X, START_Y),
            launch_radius: LAUNCH_RADIUS,
            force_factor: FORCE_FACTOR,

            gravity: GRAVITATIONAL_ACC,
            max_settle_steps: 2_000,

            round_ducks: MAX_DUCKS,
            total_rounds: TOTAL_ROUNDS,
            round_obstacles: ROUND_OBSTACLES,
            round_targets: ROUND_TARGETS,
            obstacle_size: Vec2::new(OBSTACLE_W, OBSTACLE_H),
            target_size: TARGET_SIZE,
            layout_min_x: LAYOUT_MIN_X,
            layout_min_height: (WIN_HEIGHT / 2.0).floor(),

            first_level: "level1".to_string(),
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let settings_err = |reason: String| GameError::Settings {
            path: path.display().to_string(),
            reason,
        };

        let json = fs::read_to_string(path).map_err(|e| settings_err(e.to_string()))?;
        let tuning: Tuning = serde_json::from_str(&json).map_err(|e| settings_err(e.to_string()))?;
        tuning.validate().map_err(|msg| settings_err(msg.to_string()))?;

        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.gravity.is_nan() || self.gravity <= 0.0 {
            return Err("gravity must be positive");
        }
        if self.launch_radius.is_nan() || self.launch_radius <= 0.0 {
            return Err("launch_radius must be positive");
        }
        if !self.force_factor.is_finite() || self.force_factor <= 0.0 {
            return Err("force_factor must be positive and finite");
        }
        if !self.ground_level.is_finite() {
            return Err("ground_level must be finite");
        }
        if self.total_rounds == 0 {
            return Err("total_rounds must be at least 1");
        }
        if self.round_ducks == 0 {
            return Err("round_ducks must be at least 1");
        }
        if self.max_settle_steps == 0 {
            return Err("max_settle_steps must be at least 1");
        }
        if self.layout_min_x >= self.win_width || self.layout_min_height >= self.win_height {
            return Err("layout band is empty");
        }
        Ok(())
    }

    /// Horizontal spawn band `[min, max]` for a box of the given width
    pub fn x_band(&self, width: f32) -> (f32, f32) {
        (self.layout_min_x, (self.win_width - width).max(self.layout_min_x))
    }

    /// Vertical spawn band `[min, max]` for a box of the given height
    pub fn y_band(&self, height: f32) -> (f32, f32) {
        (
            self.layout_min_height,
            (self.win_height - height).max(self.layout_min_height),
        )
    }
}
