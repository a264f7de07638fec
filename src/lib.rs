//! Miffed Ducks - a projectile-launch puzzle game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight, collisions, stacking, level/round flow)
//! - `level`: Fixed level files and where they are loaded from
//! - `settings`: Data-driven tuning (physics constants, layout bands)
//! - `runner`: Fixed-timestep driver for a frame loop
//! - `error`: Recoverable error taxonomy

pub mod error;
pub mod level;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use level::{BuiltinLevels, LevelDir, LevelFile, LevelSource, MemoryLevels};
pub use runner::Runner;
pub use settings::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const WIN_WIDTH: f32 = 626.0;
    pub const WIN_HEIGHT: f32 = 376.0;

    /// Sling anchor - where the duck rests before a pull
    pub const START_X: f32 = 50.0;
    pub const START_Y: f32 = 110.0;
    /// Maximum pull distance from the anchor
    pub const LAUNCH_RADIUS: f32 = 35.0;

    pub const GROUND_LEVEL: f32 = 85.0;
    /// Per-tick velocity decrement (not dt-scaled)
    pub const GRAVITATIONAL_ACC: f32 = 1.5;
    pub const FORCE_FACTOR: f32 = 1.0;

    /// Duck supply for each random round
    pub const MAX_DUCKS: u32 = 10;
    pub const TOTAL_ROUNDS: u32 = 3;

    /// Random round box sizes
    pub const OBSTACLE_W: f32 = 25.0;
    pub const OBSTACLE_H: f32 = 26.0;
    pub const TARGET_SIZE: f32 = 46.0;
    /// Left edge of the random layout band
    pub const LAYOUT_MIN_X: f32 = 340.0;
    pub const ROUND_OBSTACLES: usize = 3;
    pub const ROUND_TARGETS: usize = 3;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    p1.distance(p2)
}

/// Signed angle (radians) of the ray from `origin` to `point`, all four quadrants
#[inline]
pub fn angle(origin: Vec2, point: Vec2) -> f32 {
    let d = point - origin;
    d.y.atan2(d.x)
}

/// Keep a point inside a circle, projecting it radially onto the boundary if outside
pub fn clamp_inside_circle(point: Vec2, center: Vec2, radius: f32) -> Vec2 {
    let dist = distance(point, center);
    if dist > radius {
        let ratio = radius / dist;
        center + (point - center) * ratio
    } else {
        point
    }
}
