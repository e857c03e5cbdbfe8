//! Collision detection between the avatar and pipe gaps
//!
//! The avatar is an axis-aligned box; rotation is cosmetic and ignored here.

use super::state::{Avatar, Obstacle};
use crate::tuning::Tuning;

/// True if the avatar box overlaps the obstacle columns outside the gap
pub fn avatar_hits_obstacle(avatar: &Avatar, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let (left, top, right, bottom) = avatar.bounds(tuning);

    let overlaps_column = right > obstacle.x && left < obstacle.right();
    if !overlaps_column {
        return false;
    }

    top < obstacle.top_height || bottom > obstacle.bottom_y
}

/// First obstacle (in creation order) the avatar collides with
pub fn first_hit<'a>(
    avatar: &Avatar,
    obstacles: &'a [Obstacle],
    tuning: &Tuning,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|o| avatar_hits_obstacle(avatar, o, tuning))
}

/// True if the avatar centre has left the field vertically
pub fn avatar_out_of_bounds(avatar: &Avatar, tuning: &Tuning) -> bool {
    avatar.pos.y < 0.0 || avatar.pos.y > tuning.field_height
}
