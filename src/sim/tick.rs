//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{self, FlightHits};
use super::machine::{self, Transition};
use super::state::GameState;
use super::trajectory;

/// What happened during one tick, for logging and presentation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub hits: FlightHits,
    /// Duck reached the ground this tick
    pub landed: bool,
    /// Planks newly set falling by propagation
    pub loosened: usize,
    /// Targets crushed by falling planks
    pub crushed: Vec<u32>,
    pub transition: Option<Transition>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, dt: f32) -> TickReport {
    let mut report = TickReport::default();
    if !state.mode.is_playing() {
        return report;
    }

    state.time_ticks += 1;
    state.elapsed_secs += dt as f64;

    if state.duck.in_flight {
        trajectory::integrate(state);
        report.hits = collision::resolve_flight(state);
        if trajectory::has_landed(state) {
            trajectory::land(state);
            report.landed = true;
        }
    }

    // Struck structures keep collapsing after the duck is gone
    report.loosened = collision::propagate_falling(&mut state.planks);
    report.crushed = collision::update_falling_planks(state);

    report.transition = machine::evaluate_outcome(state);
    report
}
