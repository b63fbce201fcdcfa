//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (every timer counts ticks)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio, or file dependencies; side effects leave as `GameEvent`s

pub mod camera;
pub mod collision;
pub mod entities;
pub mod particles;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

/// World-space vector; addition and scalar multiply are all the game needs
pub type Vector3 = glam::Vec3;

pub use camera::Camera;
pub use collision::{ScreenRect, check_collisions};
pub use entities::{Collectible, CollectibleKind, Obstacle, ObstacleKind, Reward};
pub use particles::{Particle, ParticleSystem};
pub use player::{Player, PlayerState};
pub use state::{GameEvent, GamePhase, GameState, SimOptions};
pub use tick::{TickInput, tick};
