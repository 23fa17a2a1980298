//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platform list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod color;
pub mod level;
pub mod particles;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Contact, Side, resolve_platform_collisions, separation_side};
pub use color::Color;
pub use level::Level;
pub use particles::{Particle, ParticlePool};
pub use rect::Rect;
pub use state::{Flag, GameEvent, GamePhase, GameState, Platform, Player, Spike};
pub use tick::{TickInput, tick};
