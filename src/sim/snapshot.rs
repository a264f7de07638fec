//! Read-only view of the game state for renderers

use glam::Vec2;
use serde::Serialize;

use super::state::{GameMode, GameState, Plank, Projectile, StaticObstacle, Target};

/// Everything a frame needs to draw, borrowed from the state
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub mode: &'a GameMode,
    pub duck: &'a Projectile,
    pub targets: &'a [Target],
    pub obstacles: &'a [StaticObstacle],
    pub planks: &'a [Plank],
    pub spent: &'a [Vec2],
    pub remaining_ducks: u32,
    pub round: u32,
    pub next_level: Option<&'a str>,
    pub time_ticks: u64,
}

impl<'a> Snapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            mode: &state.mode,
            duck: &state.duck,
            targets: &state.targets,
            obstacles: &state.obstacles,
            planks: &state.planks,
            spent: &state.spent,
            remaining_ducks: state.remaining_ducks,
            round: state.round,
            next_level: state.next_level.as_deref(),
            time_ticks: state.time_ticks,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
