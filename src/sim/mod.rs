//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod layout;
pub mod machine;
pub mod snapshot;
pub mod stack;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use collision::FlightHits;
pub use machine::{Command, Transition, apply_command};
pub use snapshot::Snapshot;
pub use state::{
    BoxKind, GameMode, GameState, Plank, PlankKind, Projectile, Rect, RoundBox, StaticObstacle,
    Target,
};
pub use tick::{TickReport, tick};
pub use trajectory::{begin_drag, release};
