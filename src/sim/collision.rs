//! Collision detection and response
//!
//! Per flight tick the checks run in a fixed order: static obstacles, then
//! targets, then breakable planks. An obstacle hit stops the duck before the
//! later checks look at its position. Every check takes the first match in
//! insertion order, so outcomes are reproducible.

use glam::Vec2;

use super::state::{GameState, Plank, PlankKind, Projectile, Target};
use crate::distance;

/// What the duck struck during one flight tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightHits {
    pub obstacle: Option<u32>,
    pub target: Option<u32>,
    pub plank: Option<u32>,
}

/// Halt the duck; it stays in flight and drops from here
pub fn stop_duck(duck: &mut Projectile, ground_level: f32) {
    duck.vel = Vec2::ZERO;
    if duck.pos.y < ground_level {
        duck.pos.y = ground_level;
    }
}

/// Static obstacle test: at most one stop per tick
pub fn obstacle_collision(state: &mut GameState) -> Option<u32> {
    let pos = state.duck.pos;
    let hit = state
        .obstacles
        .iter()
        .find(|o| o.rect.contains(pos))
        .map(|o| o.id)?;

    log::debug!("Hit obstacle {hit}");
    stop_duck(&mut state.duck, state.tuning.ground_level);
    Some(hit)
}

fn target_hit_by(targets: &[Target], point: Vec2) -> Option<usize> {
    targets
        .iter()
        .position(|t| distance(point, t.pos) <= t.radius())
}

/// Target test: removes at most one target per tick
pub fn target_collision(state: &mut GameState) -> Option<u32> {
    let index = target_hit_by(&state.targets, state.duck.pos)?;
    let target = state.targets.remove(index);

    log::debug!("Hit target {}", target.id);
    stop_duck(&mut state.duck, state.tuning.ground_level);
    Some(target.id)
}

/// Breakable plank test: the first plank under the duck starts falling
pub fn breakable_collision(state: &mut GameState) -> Option<u32> {
    let pos = state.duck.pos;
    let plank = state.planks.iter_mut().find(|p| p.rect.contains(pos))?;
    plank.falling = true;
    let id = plank.id;

    log::debug!("Hit plank {id}");
    stop_duck(&mut state.duck, state.tuning.ground_level);
    Some(id)
}

/// Run the duck's checks for one flight tick, in order
pub fn resolve_flight(state: &mut GameState) -> FlightHits {
    if !state.duck.in_flight {
        return FlightHits::default();
    }
    FlightHits {
        obstacle: obstacle_collision(state),
        target: target_collision(state),
        plank: breakable_collision(state),
    }
}

/// One propagation pass over the planks.
///
/// A resting plank starts falling when a plank that was already falling at the
/// start of the pass shares its column (same x), or when it is horizontal and
/// shares that plank's block. Planks knocked loose by this pass only spread
/// the collapse on the next pass, so tall structures come down over several
/// ticks. Returns how many planks were set falling.
pub fn propagate_falling(planks: &mut [Plank]) -> usize {
    let falling: Vec<(f32, u32)> = planks
        .iter()
        .filter(|p| p.falling)
        .map(|p| (p.rect.x, p.block))
        .collect();
    if falling.is_empty() {
        return 0;
    }

    let mut count = 0;
    for plank in planks.iter_mut().filter(|p| !p.falling) {
        let loosened = falling.iter().any(|&(x, block)| {
            plank.rect.x == x || (plank.kind == PlankKind::Horizontal && plank.block == block)
        });
        if loosened {
            plank.falling = true;
            count += 1;
            log::debug!("Plank {} loosened", plank.id);
        }
    }
    count
}

/// Move falling planks. A target is crushed when a plank's anchor corner
/// `(x, y)` comes within its radius. Returns the ids of crushed targets.
pub fn update_falling_planks(state: &mut GameState) -> Vec<u32> {
    let gravity = state.tuning.gravity;
    let mut crushed = Vec::new();

    for plank in state.planks.iter_mut().filter(|p| p.falling) {
        plank.vy -= gravity;
        plank.rect.y += plank.vy;

        let corner = Vec2::new(plank.rect.x, plank.rect.y);
        state.targets.retain(|t| {
            let hit = distance(corner, t.pos) <= t.radius();
            if hit {
                log::debug!("Plank {} crushed target {}", plank.id, t.id);
                crushed.push(t.id);
            }
            !hit
        });
    }
    crushed
}
