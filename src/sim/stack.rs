//! Stacking physics for random-round boxes
//!
//! Boxes fall under gravity and come to rest on the floor or on top of a box
//! below them. Each step resolves boxes from the lowest top edge upward, so a
//! box only ever lands on boxes already resolved in the same step, and always
//! ends above every resolved box it overlaps horizontally.

use super::state::RoundBox;
use crate::settings::Tuning;

/// Advance every box by one gravity step
pub fn step(boxes: &mut [RoundBox], tuning: &Tuning) {
    // Stable sort keeps equal tops in insertion order
    boxes.sort_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));

    for i in 0..boxes.len() {
        let (resolved, rest) = boxes.split_at_mut(i);
        let block = &mut rest[0];

        block.vy += tuning.gravity;
        let new_y = block.rect.y - block.vy;

        // Highest top the box would pass through among boxes already resolved
        let support = resolved
            .iter()
            .filter(|other| block.rect.overlaps_x(&other.rect) && new_y <= other.rect.top())
            .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));

        if let Some(other) = support {
            block.rect.y = other.rect.top();
            block.vy = 0.0;
        } else if new_y <= tuning.ground_level {
            block.rect.y = tuning.ground_level;
            block.vy = 0.0;
        } else {
            block.rect.y = new_y;
        }
    }
}

/// True when the last step left every box at rest
pub fn is_settled(boxes: &[RoundBox]) -> bool {
    boxes.iter().all(|b| b.vy == 0.0)
}

/// Step until every box rests. Returns the number of steps taken, or `None`
/// if the cap was reached first.
pub fn settle(boxes: &mut [RoundBox], tuning: &Tuning) -> Option<u32> {
    for steps in 1..=tuning.max_settle_steps {
        step(boxes, tuning);
        if is_settled(boxes) {
            return Some(steps);
        }
    }
    log::warn!(
        "Boxes did not settle within {} steps",
        tuning.max_settle_steps
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BoxKind, Rect};
    use proptest::prelude::*;

    fn obstacle(x: f32, y: f32) -> RoundBox {
        RoundBox::new(BoxKind::Obstacle, Rect::new(x, y, 25.0, 26.0))
    }

    fn find(boxes: &[RoundBox], x: f32) -> &RoundBox {
        boxes.iter().find(|b| b.rect.x == x).unwrap()
    }

    #[test]
    fn test_single_box_lands_on_ground() {
        let tuning = Tuning::default();
        let mut boxes = vec![obstacle(400.0, 300.0)];
        assert!(settle(&mut boxes, &tuning).is_some());
        assert_eq!(boxes[0].rect.y, tuning.ground_level);
        assert_eq!(boxes[0].vy, 0.0);
    }

    #[test]
    fn test_box_stacks_on_box() {
        let tuning = Tuning::default();
        let mut boxes = vec![obstacle(410.0, 300.0), obstacle(400.0, 200.0)];
        settle(&mut boxes, &tuning).unwrap();

        let lower = find(&boxes, 400.0);
        let upper = find(&boxes, 410.0);
        assert_eq!(lower.rect.y, 85.0);
        assert_eq!(upper.rect.y, 111.0);
    }

    #[test]
    fn test_side_by_side_boxes_both_reach_ground() {
        let tuning = Tuning::default();
        let mut boxes = vec![obstacle(400.0, 300.0), obstacle(425.0, 200.0)];
        settle(&mut boxes, &tuning).unwrap();
        assert!(boxes.iter().all(|b| b.rect.y == 85.0));
    }

    #[test]
    fn test_initially_overlapping_boxes_separate() {
        let tuning = Tuning::default();
        let mut boxes = vec![obstacle(400.0, 200.0), obstacle(405.0, 210.0)];
        settle(&mut boxes, &tuning).unwrap();
        assert!(!boxes[0].rect.overlaps(&boxes[1].rect));
        let ys: Vec<f32> = boxes.iter().map(|b| b.rect.y).collect();
        assert!(ys.contains(&85.0) && ys.contains(&111.0));
    }

    #[test]
    fn test_fast_box_does_not_tunnel_into_resting_box() {
        let tuning = Tuning::default();
        let mut boxes = vec![obstacle(400.0, 85.0), obstacle(400.0, 120.0)];
        boxes[1].vy = 40.0;
        step(&mut boxes, &tuning);
        assert_eq!(find_by_top(&boxes, 111.0 + 26.0).rect.y, 111.0);
    }

    fn find_by_top(boxes: &[RoundBox], top: f32) -> &RoundBox {
        boxes.iter().find(|b| b.rect.top() == top).unwrap()
    }

    proptest! {
        #[test]
        fn prop_settled_boxes_rest_without_overlap(
            specs in prop::collection::vec((340i32..=580, 188i32..=330, any::<bool>()), 1..8)
        ) {
            let tuning = Tuning::default();
            let mut boxes: Vec<RoundBox> = specs
                .iter()
                .map(|&(x, y, is_target)| {
                    if is_target {
                        RoundBox::new(BoxKind::Target, Rect::new(x as f32, y as f32, 46.0, 46.0))
                    } else {
                        RoundBox::new(BoxKind::Obstacle, Rect::new(x as f32, y as f32, 25.0, 26.0))
                    }
                })
                .collect();

            prop_assert!(settle(&mut boxes, &tuning).is_some());

            for (i, b) in boxes.iter().enumerate() {
                let on_ground = b.rect.y == tuning.ground_level;
                let on_box = boxes.iter().enumerate().any(|(j, other)| {
                    i != j && b.rect.overlaps_x(&other.rect) && b.rect.y == other.rect.top()
                });
                prop_assert!(on_ground || on_box, "box {:?} floats", b.rect);

                for other in &boxes[i + 1..] {
                    prop_assert!(!b.rect.overlaps(&other.rect), "{:?} overlaps {:?}", b.rect, other.rect);
                }
            }
        }
    }
}
