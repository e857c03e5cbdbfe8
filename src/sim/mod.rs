//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Wall-clock time arrives through `TickInput`, never read directly
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{avatar_hits_obstacle, avatar_out_of_bounds, first_hit};
pub use difficulty::{gap_range, milestones, speed_for_distance, speed_multiplier};
pub use snapshot::{AvatarPose, CloudView, EffectView, ObstacleView, SceneSnapshot};
pub use state::{
    Avatar, Cloud, Effect, GameEvent, GameMode, GameState, Obstacle, Session, sanitize_name,
};
pub use tick::{TickInput, confirm_name, spawn_obstacle, tick};
