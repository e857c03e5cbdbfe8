//! Gap Glider - A gravity-driven gap-flying arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game modes)
//! - `platform`: Time source and raw input mapping
//! - `runner`: Fixed timestep frame driver
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use runner::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the per-frame tuning units)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 100.0;
    pub const AVATAR_WIDTH: f32 = 35.0;
    pub const AVATAR_HEIGHT: f32 = 30.0;
    /// Upward impulse applied on flap (pixels/s, negative = up)
    pub const JUMP_VELOCITY: f32 = -300.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 900.0;
    /// Terminal fall speed (pixels/s)
    pub const MAX_FALL_SPEED: f32 = 450.0;
    /// Rotation in degrees per pixel/s of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = 0.08;
    pub const MAX_ROTATION_DEG: f32 = 25.0;
    /// Ticks the wing stays raised after a flap
    pub const FLAP_ANIM_TICKS: u32 = 10;
    /// Minimum interval between accepted flaps (ms)
    pub const MIN_TAP_INTERVAL_MS: u64 = 100;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 36.0;
    /// Base scroll speed (pixels/tick)
    pub const BASE_SPEED: f32 = 2.0;
    /// Spawn once the newest obstacle is this far left of the right edge
    pub const SPAWN_SPACING: f32 = 200.0;
    pub const MIN_GAP: f32 = 110.0;
    pub const MAX_GAP: f32 = 170.0;
    /// Gap widening per milestone (pixels)
    pub const GAP_GROWTH: f32 = 5.0;
    /// Vertical margin split between top and bottom pipe
    pub const GAP_MARGIN: f32 = 100.0;

    /// Scoring
    pub const POINTS_PER_OBSTACLE: u32 = 10;
    pub const MILESTONE_INTERVAL: u32 = 50;
    /// Speed multiplier increase per milestone
    pub const SPEED_STEP: f32 = 0.1;

    /// Session flow
    pub const COUNTDOWN_FROM: i32 = 3;
    pub const COUNTDOWN_STEP_MS: u64 = 1000;
    pub const DEFAULT_PLAYER_NAME: &str = "Nameless";

    /// Cosmetics
    pub const CLOUD_COUNT: usize = 8;
    pub const EFFECT_LIFE_TICKS: u32 = 60;
    pub const EFFECT_DRIFT: f32 = -2.0;
}
