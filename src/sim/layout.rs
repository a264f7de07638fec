//! Random round generation
//!
//! Boxes are dropped at uniformly random integer positions inside the layout
//! band; overlaps are left for the stacking step to sort out.

use glam::Vec2;
use rand::Rng;

use super::stack;
use super::state::{BoxKind, GameState, Rect, RoundBox};
use crate::settings::Tuning;

fn random_rect(rng: &mut impl Rng, tuning: &Tuning, size: Vec2) -> Rect {
    let (min_x, max_x) = tuning.x_band(size.x);
    let (min_y, max_y) = tuning.y_band(size.y);
    let x = rng.random_range(min_x as i32..=max_x as i32) as f32;
    let y = rng.random_range(min_y as i32..=max_y as i32) as f32;
    Rect::new(x, y, size.x, size.y)
}

/// Obstacles first, then targets
pub fn generate_round(rng: &mut impl Rng, tuning: &Tuning) -> Vec<RoundBox> {
    let mut boxes = Vec::with_capacity(tuning.round_obstacles + tuning.round_targets);

    for _ in 0..tuning.round_obstacles {
        let rect = random_rect(rng, tuning, tuning.obstacle_size);
        boxes.push(RoundBox::new(BoxKind::Obstacle, rect));
    }

    let target_size = Vec2::splat(tuning.target_size);
    for _ in 0..tuning.round_targets {
        let rect = random_rect(rng, tuning, target_size);
        boxes.push(RoundBox::new(BoxKind::Target, rect));
    }

    boxes
}

/// Generate and settle a fresh layout, replacing whatever is on the field
pub fn populate_round(state: &mut GameState) {
    let tuning = state.tuning.clone();
    let mut boxes = generate_round(state.rng(), &tuning);
    if let Some(steps) = stack::settle(&mut boxes, &tuning) {
        log::debug!("Round layout settled in {steps} steps");
    }

    state.clear_field();
    for b in boxes {
        match b.kind {
            BoxKind::Obstacle => {
                state.add_obstacle(b.rect);
            }
            BoxKind::Target => {
                state.add_target(b.rect.center(), b.rect.w);
            }
        }
    }
}
