//! Frame driver
//!
//! Owns the simulation state, the clock and the latched input. Hosts call
//! `update` once per animation frame with the real frame delta; the simulation
//! itself only ever advances in `SIM_DT` steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::platform::{Clock, Command, RawInput, dispatch};
use crate::sim::{GameEvent, GameMode, GameState, SceneSnapshot, TickInput, confirm_name, tick};
use crate::tuning::{Tuning, TuningError};

/// Game instance holding all state
pub struct Game<C: Clock> {
    state: GameState,
    clock: C,
    accumulator: f32,
    input: TickInput,
    /// Events from every substep since the last drain
    events: Vec<GameEvent>,
}

impl<C: Clock> Game<C> {
    pub fn new(seed: u64, tuning: Tuning, clock: C) -> Result<Self, TuningError> {
        Ok(Self {
            state: GameState::with_tuning(seed, tuning)?,
            clock,
            accumulator: 0.0,
            input: TickInput::default(),
            events: Vec::new(),
        })
    }

    /// Read-only access for hosts and tests
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode()
    }

    /// Leave name entry and start the countdown
    pub fn confirm_name(&mut self, name: &str) -> bool {
        let now = self.clock.now_ms();
        confirm_name(&mut self.state, name, now)
    }

    /// Latch a flap / resume / restart for the next tick
    pub fn primary_action(&mut self) {
        self.input.primary_action = true;
    }

    /// Latch a pause toggle for the next tick
    pub fn toggle_pause(&mut self) {
        self.input.toggle_pause = true;
    }

    pub fn command(&mut self, command: Command) {
        match command {
            Command::PrimaryAction => self.primary_action(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    /// Feed a host event through the input dispatcher
    pub fn handle_input(&mut self, raw: RawInput) {
        if let Some(command) = dispatch(raw) {
            self.command(command);
        }
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Run simulation ticks for one frame; returns the number of substeps taken
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        // A NaN delta would poison the accumulator for good
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            log::warn!("Ignoring non-finite frame delta {}", frame_dt);
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.input.now_ms = self.clock.now_ms();
            tick(&mut self.state, &self.input, SIM_DT);
            self.events.extend(self.state.events.drain(..));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.primary_action = false;
            self.input.toggle_pause = false;
        }

        substeps
    }

    /// Scene for the renderer
    pub fn snapshot(&self) -> SceneSnapshot {
        self.state.snapshot()
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
