//! Fixed-timestep driver
//!
//! Turns variable frame time into whole simulation ticks. Intents are applied
//! straight to the state between ticks; nothing is queued.

use glam::Vec2;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::GameError;
use crate::level::LevelSource;
use crate::sim::{self, Command, GameState, Snapshot, TickReport};

pub struct Runner {
    pub state: GameState,
    levels: Box<dyn LevelSource>,
    accumulator: f32,
}

impl Runner {
    pub fn new(state: GameState, levels: impl LevelSource + 'static) -> Self {
        Self {
            state,
            levels: Box::new(levels),
            accumulator: 0.0,
        }
    }

    /// Run as many ticks as `frame_dt` covers. Returns the ticks taken.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.advance_with(frame_dt, |_| {})
    }

    /// Like [`Runner::advance`], handing each tick's report to `on_tick`
    pub fn advance_with(&mut self, frame_dt: f32, mut on_tick: impl FnMut(&TickReport)) -> u32 {
        let dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let report = sim::tick(&mut self.state, SIM_DT);
            on_tick(&report);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    pub fn begin_drag(&mut self, delta: Vec2) {
        sim::begin_drag(&mut self.state, delta);
    }

    pub fn release(&mut self) -> Result<(), GameError> {
        sim::release(&mut self.state)
    }

    pub fn command(&mut self, command: Command) -> Result<(), GameError> {
        let before = self.state.mode.clone();
        sim::apply_command(&mut self.state, self.levels.as_ref(), command)?;
        if self.state.mode != before {
            self.accumulator = 0.0;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::of(&self.state)
    }

    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested
    }
}
