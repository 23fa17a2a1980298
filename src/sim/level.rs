//! Built-in level layout

use glam::Vec2;

use super::rect::Rect;
use super::state::{Platform, Spike};

/// Platforms, hazards and goal for one run
#[derive(Debug, Clone)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub spikes: Vec<Spike>,
    /// Top-left of the win flag
    pub flag: Vec2,
}

impl Default for Level {
    /// Ground, two oscillating platforms, two ledges and the flag
    fn default() -> Self {
        Self {
            platforms: vec![
                Platform::fixed(Rect::new(0.0, 400.0, 800.0, 20.0)),
                Platform::oscillating(
                    Rect::new(200.0, 300.0, 200.0, 20.0),
                    Vec2::new(120.0, 0.0),
                    100.0,
                ),
                Platform::oscillating(
                    Rect::new(500.0, 200.0, 150.0, 20.0),
                    Vec2::new(0.0, 120.0),
                    100.0,
                ),
                Platform::fixed(Rect::new(800.0, 300.0, 200.0, 20.0)),
                Platform::fixed(Rect::new(1200.0, 200.0, 150.0, 20.0)),
            ],
            spikes: Vec::new(),
            flag: Vec2::new(1400.0, 150.0),
        }
    }
}
