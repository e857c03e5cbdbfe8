//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_PLAYER_NAME, EFFECT_DRIFT, FLAP_ANIM_TICKS, MAX_ROTATION_DEG, ROTATION_PER_VELOCITY,
};
use crate::tuning::{Tuning, TuningError};

/// Current game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the player to confirm a display name
    NameEntry,
    /// 3-2-1 before the run starts
    Countdown,
    /// Active gameplay
    Playing,
    /// Simulation and cosmetics frozen
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Things that happened during a tick (sound and HUD hooks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    /// Countdown dropped to this value
    CountdownTick(i32),
    Started,
    ObstaclePassed { distance: u32 },
    Milestone { distance: u32 },
    Paused,
    Resumed,
    GameOver { distance: u32 },
    NewRecord { distance: u32 },
}

/// The player-controlled flyer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Centre of the bounding box (x stays fixed)
    pub pos: Vec2,
    /// Vertical velocity in pixels/s (positive = down)
    pub vel_y: f32,
    /// Visual tilt in degrees, derived from velocity
    pub rotation: f32,
    /// Ticks left on the wing-up animation
    pub flap_ticks: u32,
}

impl Avatar {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.avatar_x, tuning.field_height / 2.0),
            vel_y: 0.0,
            rotation: 0.0,
            flap_ticks: 0,
        }
    }

    /// Integrate one fixed step of gravity
    pub fn integrate(&mut self, tuning: &Tuning, dt: f32) {
        self.vel_y += tuning.gravity * dt;
        self.vel_y = self.vel_y.min(tuning.max_fall_speed);
        self.pos.y += self.vel_y * dt;
        self.rotation =
            (self.vel_y * ROTATION_PER_VELOCITY).clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG);
        self.flap_ticks = self.flap_ticks.saturating_sub(1);
    }

    /// Apply the upward impulse
    pub fn flap(&mut self, tuning: &Tuning) {
        self.vel_y = tuning.jump_velocity.min(tuning.max_fall_speed);
        self.flap_ticks = FLAP_ANIM_TICKS;
    }

    /// Axis-aligned box as (left, top, right, bottom)
    pub fn bounds(&self, tuning: &Tuning) -> (f32, f32, f32, f32) {
        let half_w = tuning.avatar_width / 2.0;
        let half_h = tuning.avatar_height / 2.0;
        (
            self.pos.x - half_w,
            self.pos.y - half_h,
            self.pos.x + half_w,
            self.pos.y + half_h,
        )
    }
}

/// A pipe pair with a vertical gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom edge of the top pipe
    pub top_height: f32,
    /// Top edge of the bottom pipe
    pub bottom_y: f32,
    pub width: f32,
    /// Already scored
    pub passed: bool,
    pub gap_size: f32,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, top_height: f32, gap_size: f32, width: f32) -> Self {
        Self {
            id,
            x,
            top_height,
            bottom_y: top_height + gap_size,
            width,
            passed: false,
            gap_size,
        }
    }

    /// Trailing (right) edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical centre of the gap
    #[inline]
    pub fn gap_center(&self) -> f32 {
        (self.top_height + self.bottom_y) / 2.0
    }
}

/// Background cloud (cosmetic only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels/tick at base speed
    pub speed: f32,
    pub opacity: f32,
}

impl Cloud {
    /// Random cloud anywhere across two field widths
    pub fn scattered(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..tuning.field_width * 2.0),
                rng.random_range(0.0..tuning.field_height * 0.6),
            ),
            size: rng.random_range(20.0..60.0),
            speed: rng.random_range(0.2..0.7),
            opacity: rng.random_range(0.1..0.4),
        }
    }

    /// Drift left, re-entering from the right once fully off-field
    pub fn advance(&mut self, speed_ratio: f32, rng: &mut Pcg32, tuning: &Tuning) {
        self.pos.x -= self.speed * speed_ratio;
        if self.pos.x + self.size < 0.0 {
            self.pos.x = tuning.field_width + self.size;
            self.pos.y = rng.random_range(0.0..tuning.field_height * 0.6);
        }
    }
}

/// Effect colours (0xRRGGBB)
pub mod colors {
    pub const GOLD: u32 = 0xFFD700;
    pub const SKY: u32 = 0x87CEEB;
    pub const LIGHT_GREEN: u32 = 0x90EE90;
    pub const HOT_PINK: u32 = 0xFF69B4;
}

/// Floating text that drifts up and fades
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub pos: Vec2,
    pub text: String,
    pub color: u32,
    /// 0-1
    pub opacity: f32,
    /// Ticks remaining
    pub life: u32,
    /// Pixels/tick
    pub vel_y: f32,
}

impl Effect {
    pub fn new(pos: Vec2, text: impl Into<String>, color: u32, life: u32) -> Self {
        Self {
            pos,
            text: text.into(),
            color,
            opacity: 1.0,
            life,
            vel_y: EFFECT_DRIFT,
        }
    }

    /// Advance one tick; returns false once expired
    pub fn advance(&mut self) -> bool {
        self.pos.y += self.vel_y;
        self.opacity = (self.opacity - 1.0 / 60.0).clamp(0.0, 1.0);
        self.life = self.life.saturating_sub(1);
        self.life > 0 && self.opacity > 0.0
    }
}

/// Score, best, mode and the wall-clock bookkeeping for one process lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub player_name: String,
    pub mode: GameMode,
    pub distance: u32,
    /// Never decreases while the process lives
    pub best_distance: u32,
    /// Pixels/tick, recomputed from distance every playing tick
    pub speed: f32,
    pub countdown: i32,
    pub countdown_start_ms: u64,
    pub game_start_ms: u64,
    pub pause_start_ms: u64,
    /// Last accepted flap (None until the first one)
    pub last_flap_ms: Option<u64>,
}

impl Session {
    fn new(tuning: &Tuning) -> Self {
        Self {
            player_name: String::new(),
            mode: GameMode::NameEntry,
            distance: 0,
            best_distance: 0,
            speed: tuning.base_speed,
            countdown: tuning.countdown_from,
            countdown_start_ms: 0,
            game_start_ms: 0,
            pause_start_ms: 0,
            last_flap_ms: None,
        }
    }
}

/// Trim a display name, falling back to the placeholder when blank
pub fn sanitize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub session: Session,
    pub avatar: Avatar,
    /// Creation order (oldest first)
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub effects: Vec<Effect>,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a game state with custom balance; rejects tuning that fails `validate`
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        log::debug!("New game state (seed {})", seed);
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = (0..tuning.cloud_count)
            .map(|_| Cloud::scattered(&mut rng, &tuning))
            .collect();

        Self {
            session: Session::new(&tuning),
            avatar: Avatar::new(&tuning),
            obstacles: Vec::new(),
            clouds,
            effects: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
            rng,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.session.mode
    }

    /// Current speed relative to base (1.0 at the start of a run)
    pub fn speed_ratio(&self) -> f32 {
        self.session.speed / self.tuning.base_speed
    }

    /// Field centre, where banner effects appear
    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.tuning.field_width / 2.0, self.tuning.field_height / 2.0)
    }

    /// Queue a floating text effect
    pub fn add_effect(&mut self, pos: Vec2, text: impl Into<String>, color: u32) {
        let life = self.tuning.effect_life_ticks;
        self.effects.push(Effect::new(pos, text, color, life));
    }

    /// Put entities and counters back to a fresh run and start the countdown.
    /// Clouds, player name and best distance carry over.
    pub fn reset(&mut self, now_ms: u64) {
        self.avatar = Avatar::new(&self.tuning);
        self.obstacles.clear();
        self.effects.clear();
        self.session.distance = 0;
        self.session.speed = self.tuning.base_speed;
        self.session.mode = GameMode::Countdown;
        self.session.countdown = self.tuning.countdown_from;
        self.session.countdown_start_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.mode(), GameMode::NameEntry);
        assert_eq!(state.clouds.len(), 8);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.avatar.pos, Vec2::new(100.0, 300.0));
        assert_eq!(state.session.best_distance, 0);
        assert!((state.speed_ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let tuning = Tuning {
            field_width: 0.0,
            ..Default::default()
        };
        let err = GameState::with_tuning(1, tuning).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "field_width", .. }));

        let tuning = Tuning {
            milestone_interval: 0,
            ..Default::default()
        };
        assert!(GameState::with_tuning(1, tuning).is_err());

        let state = GameState::with_tuning(1, Tuning::default()).unwrap();
        assert_eq!(state.clouds.len(), 8);
    }

    #[test]
    fn test_obstacle_gap_invariant() {
        let obstacle = Obstacle::new(1, 400.0, 137.5, 142.25, 36.0);
        assert!((obstacle.bottom_y - obstacle.top_height - obstacle.gap_size).abs() < 1e-4);
        assert_eq!(obstacle.right(), 436.0);
    }

    #[test]
    fn test_avatar_fall_is_clamped() {
        let tuning = Tuning::default();
        let mut avatar = Avatar::new(&tuning);
        for _ in 0..600 {
            avatar.integrate(&tuning, 1.0 / 60.0);
            assert!(avatar.vel_y <= tuning.max_fall_speed);
            assert!(avatar.rotation.abs() <= MAX_ROTATION_DEG);
        }
        assert_eq!(avatar.vel_y, tuning.max_fall_speed);
        assert_eq!(avatar.rotation, 25.0);
    }

    #[test]
    fn test_effect_expires_after_life() {
        let mut effect = Effect::new(Vec2::ZERO, "+10m", colors::LIGHT_GREEN, 60);
        let mut ticks = 0;
        while effect.advance() {
            ticks += 1;
        }
        assert!(ticks < 60);
        assert!(effect.opacity >= 0.0);
        assert!(effect.pos.y < 0.0);
    }

    #[test]
    fn test_cloud_wraps_to_right_edge() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut cloud = Cloud {
            pos: Vec2::new(-40.0, 10.0),
            size: 40.0,
            speed: 0.5,
            opacity: 0.2,
        };
        cloud.advance(2.0, &mut rng, &tuning);
        assert_eq!(cloud.pos.x, tuning.field_width + 40.0);
        assert!(cloud.pos.y < tuning.field_height * 0.6);
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("  Aiko "), "Aiko");
        assert_eq!(sanitize_name("   "), DEFAULT_PLAYER_NAME);
        assert_eq!(sanitize_name(""), DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_reset_keeps_best_and_name() {
        let mut state = GameState::new(3);
        state.session.player_name = "Kai".into();
        state.session.best_distance = 80;
        state.session.distance = 40;
        state.avatar.vel_y = 120.0;
        state.obstacles.push(Obstacle::new(9, 10.0, 100.0, 120.0, 36.0));
        state.add_effect(Vec2::ZERO, "x", colors::GOLD);
        let cloud_x = state.clouds[0].pos.x;

        state.reset(5_000);

        assert_eq!(state.mode(), GameMode::Countdown);
        assert_eq!(state.session.countdown, 3);
        assert_eq!(state.session.countdown_start_ms, 5_000);
        assert_eq!(state.session.distance, 0);
        assert_eq!(state.session.best_distance, 80);
        assert_eq!(state.session.player_name, "Kai");
        assert_eq!(state.avatar.vel_y, 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.effects.is_empty());
        assert_eq!(state.clouds[0].pos.x, cloud_x);
    }
}
