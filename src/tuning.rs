//! Data-driven game balance
//!
//! All gameplay constants live in [`Tuning`]. Speeds and accelerations are
//! expressed per second; the fixed timestep turns them into per-tick motion.
//! The defaults reproduce the classic 60 FPS feel (0.5 px/frame² gravity,
//! 5 px/frame run speed, 15 px/frame dash).

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::secs_to_ticks;

/// Errors raised while loading or validating tuning data
#[derive(Debug)]
pub enum TuningError {
    /// Tuning file exists but could not be read
    Io(std::io::Error),
    /// Tuning file is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A value is outside its allowed range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {e}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (px/s, negative is up)
    pub jump_velocity: f32,
    /// Horizontal run speed (px/s)
    pub base_speed: f32,
    /// Horizontal speed while dashing (px/s)
    pub dash_speed: f32,
    /// Dash duration (seconds)
    pub dash_time: f32,
    /// Delay before another dash may start (seconds)
    pub dash_cooldown: f32,
    /// Jumps allowed between landings (ground jump + air jumps)
    pub max_jumps: u8,
    /// Particles emitted per dash / air jump
    pub particle_burst: u32,
    /// Max particle speed on each axis (px/s)
    pub particle_speed: f32,
    /// Particle pool capacity
    pub max_particles: usize,
    /// Distance below the screen bottom at which the player respawns
    pub fall_margin: f32,
    /// Player spawn point (top-left of the player box)
    pub spawn_point: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            jump_velocity: -600.0,
            base_speed: 300.0,
            dash_speed: 900.0,
            dash_time: 0.2,
            dash_cooldown: 1.0,
            max_jumps: 2,
            particle_burst: 20,
            particle_speed: 120.0,
            max_particles: 100,
            fall_margin: 100.0,
            spawn_point: Vec2::new(100.0, 100.0),
        }
    }
}

impl Tuning {
    /// Largest particle pool a tuning file may ask for
    pub const MAX_PARTICLES_LIMIT: usize = 10_000;

    /// Parse and validate tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from `path`, or the defaults when the file does not exist.
    ///
    /// A file that exists but is unreadable or invalid is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, TuningError> {
        if !path.exists() {
            log::info!("No tuning file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason })
            }
        }

        check(self.gravity.is_finite() && self.gravity > 0.0, "gravity", "must be positive")?;
        check(
            self.jump_velocity.is_finite() && self.jump_velocity < 0.0,
            "jump_velocity",
            "must be negative (upward)",
        )?;
        check(
            self.base_speed.is_finite() && self.base_speed >= 0.0,
            "base_speed",
            "must be non-negative",
        )?;
        check(
            self.dash_speed.is_finite() && self.dash_speed >= 0.0,
            "dash_speed",
            "must be non-negative",
        )?;
        check(
            self.dash_time.is_finite() && self.dash_time > 0.0,
            "dash_time",
            "must be positive",
        )?;
        check(
            self.dash_cooldown.is_finite() && self.dash_cooldown >= 0.0,
            "dash_cooldown",
            "must be non-negative",
        )?;
        check(self.max_jumps >= 1, "max_jumps", "must allow at least one jump")?;
        check(
            self.particle_speed.is_finite() && self.particle_speed >= 0.0,
            "particle_speed",
            "must be non-negative",
        )?;
        check(
            self.max_particles <= Self::MAX_PARTICLES_LIMIT,
            "max_particles",
            "must be at most 10000",
        )?;
        check(
            self.fall_margin.is_finite() && self.fall_margin >= 0.0,
            "fall_margin",
            "must be non-negative",
        )?;
        check(self.spawn_point.is_finite(), "spawn_point", "must be finite")?;
        Ok(())
    }

    /// Dash duration in ticks
    pub fn dash_ticks(&self) -> u32 {
        secs_to_ticks(self.dash_time).max(1)
    }

    /// Dash cooldown in ticks
    pub fn dash_cooldown_ticks(&self) -> u32 {
        secs_to_ticks(self.dash_cooldown)
    }
}
