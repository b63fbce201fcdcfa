//! Bounded pool of short-lived visual particles
//!
//! Not gameplay-affecting, but integrated on the simulation tick so effects
//! stay in step with the world.

use std::collections::VecDeque;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Default pool size
pub const MAX_PARTICLES: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Rgb,
    /// Ticks remaining
    pub life: i32,
    pub max_life: i32,
}

impl Particle {
    /// Fraction of life remaining, used for fading
    pub fn alpha(&self) -> f32 {
        if self.max_life > 0 {
            (self.life as f32 / self.max_life as f32).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Oldest-first evicting particle pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add one particle, evicting the oldest if the pool is full
    pub fn add(&mut self, position: Vec3, velocity: Vec3, color: Rgb, life: i32) {
        if self.capacity == 0 {
            return;
        }
        while self.particles.len() >= self.capacity {
            self.particles.pop_front();
        }
        self.particles.push_back(Particle {
            position,
            velocity,
            color,
            life,
            max_life: life,
        });
    }

    /// Emit `count` particles at `origin` with velocity uniform in [-spread, spread]
    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: Vec3,
        count: usize,
        spread: Vec3,
        color: Rgb,
        life: i32,
    ) {
        for _ in 0..count {
            let velocity = Vec3::new(
                rng.random_range(-spread.x..=spread.x),
                rng.random_range(-spread.y..=spread.y),
                rng.random_range(-spread.z..=spread.z),
            );
            self.add(origin, velocity, color, life);
        }
    }

    /// Integrate and drop expired particles
    pub fn update(&mut self) {
        for p in self.particles.iter_mut() {
            p.position += p.velocity;
            p.life -= 1;
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
