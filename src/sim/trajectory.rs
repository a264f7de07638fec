//! Sling aim and ballistic flight of the duck
//!
//! Gravity is a constant per-tick velocity decrement rather than a dt-scaled
//! acceleration; the simulation always advances in fixed 1/60 s steps.

use glam::Vec2;

use super::state::GameState;
use crate::error::GameError;
use crate::{angle, clamp_inside_circle, distance};

/// Pull the duck by `delta`, keeping it inside the launch circle
pub fn begin_drag(state: &mut GameState, delta: Vec2) {
    if !state.mode.is_playing() || state.duck.in_flight {
        return;
    }

    let anchor = state.tuning.anchor;
    let radius = state.tuning.launch_radius;
    let duck = &mut state.duck;
    duck.dragging = true;
    duck.pos = clamp_inside_circle(duck.pos + delta, anchor, radius);
}

/// Let go of the sling. Velocity points from the duck back through the anchor.
///
/// Outside play this does nothing. Releasing a duck that is already flying,
/// or launching with an empty supply, is refused without touching the flight.
pub fn release(state: &mut GameState) -> Result<(), GameError> {
    if state.duck.in_flight {
        state.duck.dragging = false;
        log::warn!("Ignoring launch: duck already in flight");
        return Err(GameError::InvariantViolation("duck already in flight"));
    }
    if !state.mode.is_playing() {
        return Ok(());
    }
    debug_assert!(state.remaining_ducks > 0, "launch with no ducks left");
    if state.remaining_ducks == 0 {
        log::warn!("Ignoring launch: no ducks left");
        return Err(GameError::InvariantViolation("launch with no ducks left"));
    }

    let anchor = state.tuning.anchor;
    let factor = state.tuning.force_factor;
    let duck = &mut state.duck;

    // Recomputed from scratch on every release
    duck.angle = angle(anchor, duck.pos);
    duck.force = distance(duck.pos, anchor);
    duck.vel = Vec2::new(-duck.angle.cos(), -duck.angle.sin()) * duck.force * factor;
    duck.in_flight = true;
    duck.dragging = false;

    log::debug!(
        "Launch: angle={:.3} force={:.1} vel=({:.2}, {:.2})",
        duck.angle,
        duck.force,
        duck.vel.x,
        duck.vel.y
    );
    Ok(())
}

/// Advance a flying duck by one tick
pub fn integrate(state: &mut GameState) {
    let gravity = state.tuning.gravity;
    let duck = &mut state.duck;
    if !duck.in_flight {
        return;
    }
    duck.vel.y -= gravity;
    duck.pos += duck.vel;
}

/// True once the duck has reached the ground line
pub fn has_landed(state: &GameState) -> bool {
    state.duck.in_flight && state.duck.pos.y <= state.tuning.ground_level
}

/// End a launch-to-rest cycle: consume the duck and ready the next one
pub fn land(state: &mut GameState) {
    if !state.duck.in_flight {
        return;
    }

    let landing = Vec2::new(state.duck.pos.x, state.tuning.ground_level);
    state.spent.push(landing);

    debug_assert!(state.remaining_ducks > 0, "landing with no ducks left");
    state.remaining_ducks = state.remaining_ducks.saturating_sub(1);
    state.reset_duck();

    log::debug!(
        "Duck landed at x={:.1}, {} left",
        landing.x,
        state.remaining_ducks
    );
}
