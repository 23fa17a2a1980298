//! Frame loop
//!
//! Turns variable display frames into fixed simulation ticks, latches
//! one-shot input until a tick consumes it, and keeps the camera on the
//! player.

use glam::Vec2;

use crate::camera::Camera2D;
use crate::consts::*;
use crate::renderer::{Frame, compose};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Game instance holding simulation, camera and pending input
pub struct Game {
    pub state: GameState,
    pub camera: Camera2D,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings) -> Self {
        let mut state = GameState::new(seed, tuning);
        let cap = settings.max_particles(state.tuning.max_particles);
        state.particles.set_capacity(cap);

        let mut camera =
            Camera2D::centered(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), state.player.pos);
        camera.zoom = settings.effective_zoom();

        Self {
            state,
            camera,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Re-apply settings that affect a running game
    pub fn apply_settings(&mut self, settings: &Settings) {
        let cap = settings.max_particles(self.state.tuning.max_particles);
        self.state.particles.set_capacity(cap);
        self.camera.zoom = settings.effective_zoom();
    }

    /// Queue input for the next tick. Presses stay latched until consumed.
    pub fn push_input(&mut self, input: &TickInput) {
        self.input.merge(input);
    }

    /// Pending input (for inspection)
    pub fn pending_input(&self) -> &TickInput {
        &self.input
    }

    /// Run as many fixed ticks as `frame_dt` covers; returns the events they raised
    pub fn update(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        // NaN would stick in the accumulator and stall every later frame
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::warn!("Simulation falling behind, dropping {:.3}s", self.accumulator);
            self.accumulator = 0.0;
        }

        self.camera.follow(self.state.player.pos);
        self.state.drain_events()
    }

    /// Compose the current frame
    pub fn frame(&self) -> Frame {
        compose(&self.state, &self.camera)
    }
}
