//! Scrolling Platformer - a single-screen 2D platformer
//!
//! Core modules:
//! - `audio`: Procedural sound effects for game events
//! - `sim`: Deterministic simulation (player, platforms, collisions, particles)
//! - `game`: Fixed-timestep frame loop and camera follow
//! - `camera`: 2D camera transform
//! - `renderer`: Scene composition and WebGPU pipeline
//! - `platform`: Browser/native platform abstraction (keyboard input)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod camera;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use camera::Camera2D;
pub use game::Game;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame at the target rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 450.0;
    pub const WINDOW_TITLE: &str = "Scrolling Platformer";

    /// Player box (square)
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Win flag box
    pub const FLAG_WIDTH: f32 = 40.0;
    pub const FLAG_HEIGHT: f32 = 80.0;

    /// Offset of overhead text labels ("You Win!", "You Died!") from their anchor
    pub const LABEL_OFFSET_X: f32 = -50.0;
    pub const LABEL_OFFSET_Y: f32 = -20.0;
    pub const LABEL_FONT_SIZE: f32 = 20.0;
}

/// Convert a duration in seconds to a whole number of simulation ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs / consts::SIM_DT).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(0.2), 12);
        assert_eq!(secs_to_ticks(1.0), 60);
        assert_eq!(secs_to_ticks(0.0), 0);
        assert_eq!(secs_to_ticks(-1.0), 0);
    }
}
