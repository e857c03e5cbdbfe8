//! Difficulty curve
//!
//! Speed and gap size are pure functions of distance. Nothing here advances on
//! its own, so pausing or resuming can never desync speed from score.

use std::ops::Range;

use crate::tuning::Tuning;

/// Completed milestones at this distance
#[inline]
pub fn milestones(distance: u32, tuning: &Tuning) -> u32 {
    distance / tuning.milestone_interval
}

/// Speed multiplier: +`speed_step` per milestone
pub fn speed_multiplier(distance: u32, tuning: &Tuning) -> f32 {
    1.0 + tuning.speed_step * milestones(distance, tuning) as f32
}

/// Obstacle scroll speed in pixels/tick
pub fn speed_for_distance(distance: u32, tuning: &Tuning) -> f32 {
    tuning.base_speed * speed_multiplier(distance, tuning)
}

/// Range the gap size is drawn from (half-open, widens per milestone)
pub fn gap_range(distance: u32, tuning: &Tuning) -> Range<f32> {
    let growth = tuning.gap_growth * milestones(distance, tuning) as f32;
    (tuning.min_gap + growth)..(tuning.max_gap + growth)
}

/// Whether reaching this distance crosses a milestone
pub fn is_milestone(distance: u32, tuning: &Tuning) -> bool {
    distance > 0 && distance % tuning.milestone_interval == 0
}
