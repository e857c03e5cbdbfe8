//! Read-only scene view handed to the renderer after each frame
//!
//! Owned rather than borrowed so a render thread can hold one while the next
//! frame simulates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Cloud, Effect, GameMode, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarPose {
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Wing raised
    pub flapping: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    pub top_height: f32,
    pub bottom_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub pos: Vec2,
    pub text: String,
    pub color: u32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudView {
    pub pos: Vec2,
    pub size: f32,
    pub opacity: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub field_width: f32,
    pub field_height: f32,
    pub avatar: AvatarPose,
    pub obstacles: Vec<ObstacleView>,
    pub clouds: Vec<CloudView>,
    pub effects: Vec<EffectView>,
    pub distance: u32,
    pub best_distance: u32,
    pub speed_ratio: f32,
    pub mode: GameMode,
    pub countdown: i32,
    pub player_name: String,
}

impl From<&Cloud> for CloudView {
    fn from(cloud: &Cloud) -> Self {
        Self {
            pos: cloud.pos,
            size: cloud.size,
            opacity: cloud.opacity,
        }
    }
}

impl From<&Effect> for EffectView {
    fn from(effect: &Effect) -> Self {
        Self {
            pos: effect.pos,
            text: effect.text.clone(),
            color: effect.color,
            opacity: effect.opacity,
        }
    }
}

impl GameState {
    /// Capture the current scene
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            field_width: self.tuning.field_width,
            field_height: self.tuning.field_height,
            avatar: AvatarPose {
                pos: self.avatar.pos,
                rotation: self.avatar.rotation,
                // Wing sits up for the first half of the flap animation
                flapping: self.avatar.flap_ticks > crate::consts::FLAP_ANIM_TICKS / 2,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    width: o.width,
                    top_height: o.top_height,
                    bottom_y: o.bottom_y,
                })
                .collect(),
            clouds: self.clouds.iter().map(CloudView::from).collect(),
            effects: self.effects.iter().map(EffectView::from).collect(),
            distance: self.session.distance,
            best_distance: self.session.best_distance,
            speed_ratio: self.speed_ratio(),
            mode: self.session.mode,
            countdown: self.session.countdown,
            player_name: self.session.player_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, colors};

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(11);
        state.session.player_name = "Rin".into();
        state.session.distance = 30;
        state.session.best_distance = 90;
        state.obstacles.push(Obstacle::new(1, 250.0, 120.0, 150.0, 36.0));
        state.add_effect(Vec2::new(5.0, 6.0), "+10m", colors::LIGHT_GREEN);

        let snap = state.snapshot();
        assert_eq!(snap.mode, GameMode::NameEntry);
        assert_eq!(snap.player_name, "Rin");
        assert_eq!(snap.distance, 30);
        assert_eq!(snap.best_distance, 90);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].bottom_y, 270.0);
        assert_eq!(snap.effects[0].text, "+10m");
        assert_eq!(snap.clouds.len(), state.clouds.len());
        assert!(!snap.avatar.flapping);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snap = GameState::new(1).snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"mode\":\"NameEntry\""));
        let back: SceneSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mode, snap.mode);
        assert_eq!(back.clouds.len(), snap.clouds.len());
        assert_eq!(back.avatar.pos, snap.avatar.pos);
    }
}
