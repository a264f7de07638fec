//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; components are
//! free functions taking it by `&mut`, so there is no ambient global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Tuning;

/// Current mode of the level/round state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameMode {
    /// Mode selection screen
    Menu,
    /// Playing a hand-authored level
    FixedLevel(String),
    /// Playing a generated round (1-based)
    RandomRound(u32),
    Win,
    Lose,
}

impl GameMode {
    /// True while a level or round is being played
    pub fn is_playing(&self) -> bool {
        matches!(self, GameMode::FixedLevel(_) | GameMode::RandomRound(_))
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner (y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Point-in-rectangle test, edges inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        self.x <= p.x && p.x <= self.right() && self.y <= p.y && p.y <= self.top()
    }

    /// Horizontal spans overlap (touching edges do not count)
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    /// Interiors overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.y < other.top() && other.y < self.top()
    }
}

/// The launchable duck
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Aim angle at the last release (radians)
    pub angle: f32,
    /// Pull distance at the last release
    pub force: f32,
    pub in_flight: bool,
    pub dragging: bool,
}

impl Projectile {
    /// An idle duck sitting in the sling
    pub fn at_rest(anchor: Vec2) -> Self {
        Self {
            pos: anchor,
            vel: Vec2::ZERO,
            angle: 0.0,
            force: 0.0,
            in_flight: false,
            dragging: false,
        }
    }
}

/// Circular goal, destroyed on first hit
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub diameter: f32,
}

impl Target {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }
}

/// Immovable rectangle that only halts the duck
#[derive(Debug, Clone, Serialize)]
pub struct StaticObstacle {
    pub id: u32,
    pub rect: Rect,
}

/// Orientation of a plank, which decides how falling spreads through a structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlankKind {
    #[default]
    Vertical,
    Horizontal,
}

/// Breakable obstacle
#[derive(Debug, Clone, Serialize)]
pub struct Plank {
    pub id: u32,
    pub rect: Rect,
    /// Once set, never cleared for the lifetime of the level
    pub falling: bool,
    /// Vertical velocity (negative = downward)
    pub vy: f32,
    pub kind: PlankKind,
    /// Structure grouping key shared by planks of one column/row
    pub block: u32,
}

/// What a random-round box becomes once it has settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoxKind {
    Obstacle,
    Target,
}

/// Free box used while assembling a random round
#[derive(Debug, Clone, Serialize)]
pub struct RoundBox {
    pub rect: Rect,
    /// Fall speed (positive = downward)
    pub vy: f32,
    pub kind: BoxKind,
}

impl RoundBox {
    pub fn new(kind: BoxKind, rect: Rect) -> Self {
        Self { rect, vy: 0.0, kind }
    }
}

/// Complete game state (deterministic for a given seed and intent sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub mode: GameMode,
    /// Whether the current (or just finished) play is the random sequence
    pub random_mode: bool,
    /// Ducks left, including the one in the sling or in the air
    pub remaining_ducks: u32,
    pub duck: Projectile,
    /// Active targets, in insertion order
    pub targets: Vec<Target>,
    pub obstacles: Vec<StaticObstacle>,
    pub planks: Vec<Plank>,
    /// Landing spots of ducks already used in this level/round
    pub spent: Vec<Vec2>,
    /// Fixed levels entered since the last menu visit
    pub history: Vec<String>,
    /// Current random round (1-based)
    pub round: u32,
    /// Successor of the current fixed level, if any
    pub next_level: Option<String>,
    /// Simulation tick counter (play modes only)
    pub time_ticks: u64,
    pub elapsed_secs: f64,
    /// Set by the quit command; the embedder shuts down
    pub quit_requested: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let duck = Projectile::at_rest(tuning.anchor);
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode: GameMode::Menu,
            random_mode: false,
            remaining_ducks: 0,
            duck,
            targets: Vec::new(),
            obstacles: Vec::new(),
            planks: Vec::new(),
            spent: Vec::new(),
            history: Vec::new(),
            round: 1,
            next_level: None,
            time_ticks: 0,
            elapsed_secs: 0.0,
            quit_requested: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Put the duck back in the sling, idle
    pub fn reset_duck(&mut self) {
        self.duck = Projectile::at_rest(self.tuning.anchor);
    }

    /// Drop every target, obstacle, plank and spent duck
    pub fn clear_field(&mut self) {
        self.targets.clear();
        self.obstacles.clear();
        self.planks.clear();
        self.spent.clear();
    }

    pub fn add_target(&mut self, pos: Vec2, diameter: f32) -> u32 {
        let id = self.next_entity_id();
        self.targets.push(Target { id, pos, diameter });
        id
    }

    pub fn add_obstacle(&mut self, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(StaticObstacle { id, rect });
        id
    }

    pub fn add_plank(&mut self, rect: Rect, kind: PlankKind, block: u32) -> u32 {
        let id = self.next_entity_id();
        self.planks.push(Plank {
            id,
            rect,
            falling: false,
            vy: 0.0,
            kind,
            block,
        });
        id
    }
}
