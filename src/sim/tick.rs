//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within a tick the
//! order is: commands, clouds, mode-gated update (countdown or physics), effects.

use glam::Vec2;
use rand::Rng;

use super::collision::{avatar_out_of_bounds, first_hit};
use super::difficulty::{gap_range, is_milestone, speed_for_distance};
use super::state::{GameEvent, GameMode, GameState, Obstacle, colors, sanitize_name};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock time of this tick in milliseconds
    pub now_ms: u64,
    /// Flap / resume / restart (click, tap, space)
    pub primary_action: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

/// Confirm the display name and start the first countdown.
/// Returns false if not waiting for a name.
pub fn confirm_name(state: &mut GameState, raw_name: &str, now_ms: u64) -> bool {
    if state.session.mode != GameMode::NameEntry {
        return false;
    }
    state.session.player_name = sanitize_name(raw_name);
    log::info!("Player \"{}\" joined", state.session.player_name);
    state.reset(now_ms);
    true
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    let mut input = input.clone();
    if input.autopilot {
        apply_autopilot(state, &mut input);
    }
    let input = &input;
    let now = input.now_ms;

    // Pause toggle wins over a primary action in the same tick
    let toggled = input.toggle_pause && toggle_pause(state, now);
    if !toggled && input.primary_action {
        primary_action(state, now);
    }

    // Paused freezes everything, cosmetics included
    if state.session.mode == GameMode::Paused {
        return;
    }

    state.time_ticks += 1;

    advance_clouds(state);

    match state.session.mode {
        GameMode::Countdown => update_countdown(state, now),
        GameMode::Playing => {
            update_avatar(state, dt);
            if state.session.mode == GameMode::Playing {
                update_obstacles(state);
            }
        }
        _ => {}
    }

    state.effects.retain_mut(|e| e.advance());
}

/// Route the primary command by mode
fn primary_action(state: &mut GameState, now: u64) {
    match state.session.mode {
        GameMode::Playing => flap(state, now),
        GameMode::Paused => {
            toggle_pause(state, now);
        }
        GameMode::GameOver => {
            log::info!("Restarting (best {}m)", state.session.best_distance);
            state.reset(now);
        }
        GameMode::NameEntry | GameMode::Countdown => {}
    }
}

/// Playing <-> Paused. Returns true if the mode changed.
fn toggle_pause(state: &mut GameState, now: u64) -> bool {
    let center = state.field_center();
    match state.session.mode {
        GameMode::Playing => {
            state.session.mode = GameMode::Paused;
            state.session.pause_start_ms = now;
            state.add_effect(center, "Paused", colors::HOT_PINK);
            state.events.push(GameEvent::Paused);
            log::info!("Paused at {}m", state.session.distance);
            true
        }
        GameMode::Paused => {
            // Shift the time origins so the pause never counts as elapsed time
            let paused_for = now.saturating_sub(state.session.pause_start_ms);
            state.session.countdown_start_ms += paused_for;
            state.session.game_start_ms += paused_for;
            state.session.mode = GameMode::Playing;
            state.add_effect(center, "Resume!", colors::LIGHT_GREEN);
            state.events.push(GameEvent::Resumed);
            log::info!("Resumed after {}ms", paused_for);
            true
        }
        _ => false,
    }
}

/// Upward impulse, debounced on wall-clock time
fn flap(state: &mut GameState, now: u64) {
    let interval = state.tuning.min_tap_interval_ms;
    if state
        .session
        .last_flap_ms
        .is_some_and(|last| now.saturating_sub(last) < interval)
    {
        return;
    }

    state.avatar.flap(&state.tuning);
    state.session.last_flap_ms = Some(now);
    let pos = state.avatar.pos + Vec2::new(20.0, 0.0);
    state.add_effect(pos, "Whoosh", colors::SKY);
    state.events.push(GameEvent::Flap);
}

fn update_countdown(state: &mut GameState, now: u64) {
    let elapsed = now.saturating_sub(state.session.countdown_start_ms);
    if elapsed <= state.tuning.countdown_step_ms {
        return;
    }

    state.session.countdown -= 1;
    state.session.countdown_start_ms = now;
    state
        .events
        .push(GameEvent::CountdownTick(state.session.countdown));

    if state.session.countdown < 0 {
        state.session.mode = GameMode::Playing;
        state.session.game_start_ms = now;
        state.events.push(GameEvent::Started);
        log::info!("Run started for \"{}\"", state.session.player_name);
    }
}

fn update_avatar(state: &mut GameState, dt: f32) {
    state.avatar.integrate(&state.tuning, dt);

    if avatar_out_of_bounds(&state.avatar, &state.tuning) {
        log::debug!("Left the field at y={:.1}", state.avatar.pos.y);
        game_over(state);
    }
}

/// Spawn, scroll, collide, score and retire obstacles
fn update_obstacles(state: &mut GameState) {
    let speed = speed_for_distance(state.session.distance, &state.tuning);
    state.session.speed = speed;

    let spawn_line = state.tuning.field_width - state.tuning.spawn_spacing;
    if state.obstacles.last().is_none_or(|o| o.x < spawn_line) {
        spawn_obstacle(state);
    }

    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }

    if let Some(hit) = first_hit(&state.avatar, &state.obstacles, &state.tuning) {
        log::debug!("Hit obstacle {} at x={:.1}", hit.id, hit.x);
        game_over(state);
        return;
    }

    let avatar_x = state.avatar.pos.x;
    let mut newly_passed = 0;
    for obstacle in &mut state.obstacles {
        if !obstacle.passed && obstacle.right() < avatar_x {
            obstacle.passed = true;
            newly_passed += 1;
        }
    }
    for _ in 0..newly_passed {
        score_obstacle(state);
    }

    state.obstacles.retain(|o| o.right() >= 0.0);
}

/// Add a new obstacle at the right edge with a random gap
pub fn spawn_obstacle(state: &mut GameState) {
    let tuning = &state.tuning;
    let range = gap_range(state.session.distance, tuning);
    let gap_size = if range.start < range.end {
        state.rng.random_range(range)
    } else {
        range.start
    };

    // Half the margin above the gap at minimum, half below
    let span = (tuning.field_height - gap_size - tuning.gap_margin).max(0.0);
    let offset = if span > 0.0 {
        state.rng.random_range(0.0..span)
    } else {
        0.0
    };
    let top_height = offset + tuning.gap_margin / 2.0;
    let x = tuning.field_width;
    let width = tuning.obstacle_width;

    let id = state.next_entity_id();
    let obstacle = Obstacle::new(id, x, top_height, gap_size, width);
    log::debug!(
        "Spawned obstacle {} gap {:.1}..{:.1}",
        id,
        obstacle.top_height,
        obstacle.bottom_y
    );
    state.obstacles.push(obstacle);
}

fn score_obstacle(state: &mut GameState) {
    let points = state.tuning.points_per_obstacle;
    state.session.distance += points;
    let distance = state.session.distance;

    let pos = state.avatar.pos + Vec2::new(30.0, -20.0);
    state.add_effect(pos, format!("+{points}m"), colors::LIGHT_GREEN);
    state.events.push(GameEvent::ObstaclePassed { distance });

    if is_milestone(distance, &state.tuning) {
        let center = state.field_center();
        state.add_effect(center, format!("{distance}m! Speed up!"), colors::HOT_PINK);
        state.events.push(GameEvent::Milestone { distance });
        log::info!("Milestone {}m reached", distance);
    }
}

/// Playing -> GameOver, recording a new best if earned
fn game_over(state: &mut GameState) {
    let distance = state.session.distance;
    state.session.mode = GameMode::GameOver;
    state.events.push(GameEvent::GameOver { distance });
    log::info!("Game over at {}m", distance);

    if distance > state.session.best_distance {
        state.session.best_distance = distance;
        let pos = state.field_center() + Vec2::new(0.0, 20.0);
        state.add_effect(pos, "New record!", colors::GOLD);
        state.events.push(GameEvent::NewRecord { distance });
        log::info!("New record: {}m", distance);
    }
}

/// Clouds drift at the current scroll ratio (frozen only while paused)
fn advance_clouds(state: &mut GameState) {
    let ratio = state.speed_ratio();
    let GameState {
        clouds,
        rng,
        tuning,
        ..
    } = state;
    for cloud in clouds.iter_mut() {
        cloud.advance(ratio, rng, tuning);
    }
}

/// Demo AI: keep the avatar near the next gap centre, restart on game over
fn apply_autopilot(state: &GameState, input: &mut TickInput) {
    match state.session.mode {
        GameMode::GameOver => input.primary_action = true,
        GameMode::Playing => {
            let (left, ..) = state.avatar.bounds(&state.tuning);
            let target = state
                .obstacles
                .iter()
                .find(|o| o.right() > left)
                .map(|o| o.gap_center())
                .unwrap_or(state.tuning.field_height / 2.0);

            // Flap when sinking below the target and not already climbing hard
            if state.avatar.pos.y > target + 15.0 && state.avatar.vel_y > -100.0 {
                input.primary_action = true;
            }
        }
        _ => {}
    }
}
