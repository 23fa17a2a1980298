//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Contact;
use super::color::Color;
use super::level::Level;
use super::particles::ParticlePool;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player is in control
    Playing,
    /// Player touched a spike, waiting for respawn input
    Dead,
    /// Flag reached; the run is over
    Won,
}

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A jump started. `air` is true for every jump after the first since landing.
    Jumped { air: bool },
    DashStarted,
    /// Player dropped below the screen and was respawned
    FellOut,
    /// Player respawned on request
    Respawned,
    Died,
    FlagReached,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left of the player box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current horizontal speed (base or dash)
    pub speed: f32,
    pub jump_count: u8,
    pub dashing: bool,
    /// Ticks of dash remaining
    pub dash_ticks: u32,
    /// Ticks until another dash may start
    pub dash_cooldown_ticks: u32,
    /// Set when the last collision pass landed on a platform top
    pub grounded: bool,
    pub alive: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed: 0.0,
            jump_count: 0,
            dashing: false,
            dash_ticks: 0,
            dash_cooldown_ticks: 0,
            grounded: false,
            alive: true,
        };
        player.respawn(tuning);
        player
    }

    /// Reset everything back to the spawn point
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = tuning.spawn_point;
        self.vel = Vec2::ZERO;
        self.speed = tuning.base_speed;
        self.jump_count = 0;
        self.dashing = false;
        self.dash_ticks = 0;
        self.dash_cooldown_ticks = 0;
        self.grounded = false;
        self.alive = true;
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(PLAYER_SIZE * 0.5)
    }

    /// Count down dash and cooldown timers; ends the dash when it runs out
    pub fn update_dash_timers(&mut self, tuning: &Tuning) {
        if self.dash_cooldown_ticks > 0 {
            self.dash_cooldown_ticks -= 1;
        }
        if self.dashing {
            self.dash_ticks = self.dash_ticks.saturating_sub(1);
            if self.dash_ticks == 0 {
                self.dashing = false;
                self.speed = tuning.base_speed;
            }
        }
    }

    /// Start a dash if the cooldown allows. Returns whether it started.
    pub fn try_dash(&mut self, tuning: &Tuning) -> bool {
        if self.dash_cooldown_ticks > 0 {
            return false;
        }
        self.dashing = true;
        self.dash_ticks = tuning.dash_ticks();
        self.dash_cooldown_ticks = tuning.dash_cooldown_ticks();
        self.speed = tuning.dash_speed;
        true
    }

    /// Start a jump if any are left. Returns the new jump count on success.
    pub fn try_jump(&mut self, tuning: &Tuning) -> Option<u8> {
        if self.jump_count >= tuning.max_jumps {
            return None;
        }
        self.vel.y = tuning.jump_velocity;
        self.jump_count += 1;
        Some(self.jump_count)
    }

    /// Horizontal speed for this tick
    #[inline]
    pub fn current_speed(&self, tuning: &Tuning) -> f32 {
        if self.dashing {
            tuning.dash_speed
        } else {
            self.speed
        }
    }
}

/// A solid platform, optionally oscillating along one or both axes
#[derive(Debug, Clone)]
pub struct Platform {
    pub rect: Rect,
    pub color: Color,
    /// Velocity in px/s (only used when `moving`)
    pub vel: Vec2,
    /// Center of the travel range
    pub start: Vec2,
    /// Travel distance either side of `start`
    pub move_distance: f32,
    pub moving: bool,
}

impl Platform {
    pub fn fixed(rect: Rect) -> Self {
        Self {
            rect,
            color: Color::GRAY,
            vel: Vec2::ZERO,
            start: rect.origin(),
            move_distance: 0.0,
            moving: false,
        }
    }

    pub fn oscillating(rect: Rect, vel: Vec2, move_distance: f32) -> Self {
        Self {
            rect,
            color: Color::GRAY,
            vel,
            start: rect.origin(),
            move_distance,
            moving: true,
        }
    }

    /// Move one step and bounce off the ends of the travel range
    pub fn advance(&mut self, dt: f32) {
        if !self.moving {
            return;
        }
        let (x, vx) = bounce_axis(self.rect.x, self.vel.x, self.start.x, self.move_distance, dt);
        let (y, vy) = bounce_axis(self.rect.y, self.vel.y, self.start.y, self.move_distance, dt);
        self.rect.x = x;
        self.rect.y = y;
        self.vel = Vec2::new(vx, vy);
    }
}

/// Advance one coordinate, clamping onto the bound and reversing when it is crossed
fn bounce_axis(pos: f32, vel: f32, start: f32, distance: f32, dt: f32) -> (f32, f32) {
    if vel == 0.0 {
        return (pos, vel);
    }
    let next = pos + vel * dt;
    let (min, max) = (start - distance, start + distance);
    if next >= max {
        (max, -vel.abs())
    } else if next <= min {
        (min, vel.abs())
    } else {
        (next, vel)
    }
}

/// A floor spike. Touching it kills the player.
#[derive(Debug, Clone)]
pub struct Spike {
    /// Bottom center of the triangle
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Spike {
    /// Bounding box used for contact
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - self.width * 0.5,
            self.pos.y - self.height,
            self.width,
            self.height,
        )
    }

    /// Triangle corners: left base, apex, right base
    pub fn corners(&self) -> [Vec2; 3] {
        let half = self.width * 0.5;
        [
            Vec2::new(self.pos.x - half, self.pos.y),
            Vec2::new(self.pos.x, self.pos.y - self.height),
            Vec2::new(self.pos.x + half, self.pos.y),
        ]
    }
}

/// The win flag
#[derive(Debug, Clone)]
pub struct Flag {
    /// Top-left of the flag box
    pub pos: Vec2,
    /// Latched once the player touches the flag
    pub reached: bool,
}

impl Flag {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            reached: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::new(FLAG_WIDTH, FLAG_HEIGHT))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub spikes: Vec<Spike>,
    pub flag: Flag,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticlePool,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Platform contacts resolved on the last tick (buffer reused every tick)
    pub contacts: Vec<Contact>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game on the built-in level
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_level(seed, tuning, Level::default())
    }

    /// Create a new game on an explicit level
    pub fn with_level(seed: u64, tuning: Tuning, level: Level) -> Self {
        let player = Player::new(&tuning);
        let particles = ParticlePool::with_capacity(tuning.max_particles);
        Self {
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            platforms: level.platforms,
            spikes: level.spikes,
            flag: Flag::new(level.flag),
            particles,
            events: Vec::new(),
            contacts: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Emit a particle burst at `pos`; returns how many were accepted
    pub fn emit_burst(&mut self, pos: Vec2, color: Color) -> usize {
        let count = self.tuning.particle_burst;
        let speed = self.tuning.particle_speed;
        self.particles
            .spawn_burst(&mut self.rng, pos, color, speed, count)
    }
}
