//! Particle effects
//!
//! Short-lived squares scattered on dash and air jump. Particles never affect
//! gameplay. The pool is bounded: spawns beyond capacity are dropped.

use glam::Vec2;
use rand::Rng;

use super::color::{Color, alpha_byte};

/// A single visual particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Edge length of the square
    pub size: f32,
    /// 1.0 at spawn, removed once it reaches 0
    pub life: f32,
    pub color: Color,
}

impl Particle {
    /// Random scatter around `pos`
    pub fn scatter<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, color: Color, speed: f32) -> Self {
        let vel = Vec2::new(
            rng.random_range(-speed..=speed),
            rng.random_range(-speed..=speed),
        );
        Self {
            pos,
            vel,
            rotation: rng.random_range(0.0..360.0),
            size: rng.random_range(2..=6) as f32,
            life: 1.0,
            color,
        }
    }

    /// Advance one step; alpha tracks remaining life
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= dt;
        self.color.a = alpha_byte(self.life);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Capped particle container with insert-or-reject semantics.
///
/// Storage grows with live particles; the cap is never allocated up front.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::new(),
            capacity,
        }
    }

    /// Change the cap. Shrinking drops the newest particles.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.particles.truncate(capacity);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Insert a particle, or return `false` if the pool is full
    pub fn try_push(&mut self, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Spawn one randomized particle at `pos`
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        color: Color,
        speed: f32,
    ) -> bool {
        if self.is_full() {
            return false;
        }
        self.try_push(Particle::scatter(rng, pos, color, speed))
    }

    /// Spawn up to `count` particles; returns how many were accepted
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        color: Color,
        speed: f32,
        count: u32,
    ) -> usize {
        let mut accepted = 0;
        for _ in 0..count {
            if !self.spawn(rng, pos, color, speed) {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    /// Advance every particle and prune the expired ones; returns the pruned count
    pub fn update(&mut self, dt: f32) -> usize {
        for particle in self.particles.iter_mut() {
            particle.update(dt);
        }
        let before = self.particles.len();
        self.particles.retain(Particle::is_alive);
        before - self.particles.len()
    }
}
