//! Obstacles and collectibles placed along the path

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::ScreenRect;
use super::player::PlayerState;
use crate::consts::*;
use crate::{Rgb, palette};

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Tall wall, slide under it
    Barrier,
    /// Hole in the path, jump over it
    Gap,
    Boulder,
    MovingBarrier,
    SpikeTrap,
}

impl ObstacleKind {
    /// Whether a player in `state` passes through this obstacle unharmed.
    /// Boulders, moving barriers and spike traps have no safe action.
    pub fn avoided_by(self, state: PlayerState) -> bool {
        matches!(
            (self, state),
            (ObstacleKind::Barrier, PlayerState::Sliding) | (ObstacleKind::Gap, PlayerState::Jumping)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObstacleKind::Barrier => "barrier",
            ObstacleKind::Gap => "gap",
            ObstacleKind::Boulder => "boulder",
            ObstacleKind::MovingBarrier => "moving_barrier",
            ObstacleKind::SpikeTrap => "spike_trap",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    pub kind: ObstacleKind,
    pub lane: i32,
    pub size: i32,
    pub active: bool,
}

impl Obstacle {
    pub fn new(position: Vec3, kind: ObstacleKind, lane: i32) -> Self {
        Self {
            position,
            kind,
            lane,
            size: OBSTACLE_SIZE,
            active: true,
        }
    }

    /// Deactivate once far enough behind the player
    pub fn update(&mut self, player_z: f32) {
        if self.position.z < player_z - OBSTACLE_CULL_DISTANCE {
            self.active = false;
        }
    }

    pub fn collision_rect(&self, camera: &Camera) -> ScreenRect {
        ScreenRect::around(camera.project(self.position), self.size, self.size)
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Gem,
    Powerup,
}

/// Particle burst emitted on pickup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    /// Velocity range per axis is [-spread, spread]
    pub spread: Vec3,
    pub color: Rgb,
    pub life: i32,
}

/// What a pickup is worth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reward {
    pub coins: u32,
    pub score: u64,
    pub invulnerable_ticks: Option<i32>,
    pub burst: Burst,
}

impl CollectibleKind {
    pub fn reward(self) -> Reward {
        match self {
            CollectibleKind::Coin => Reward {
                coins: 1,
                score: 10,
                invulnerable_ticks: None,
                burst: Burst {
                    count: 5,
                    spread: Vec3::new(2.0, 2.0, 1.0),
                    color: palette::GOLD,
                    life: 30,
                },
            },
            CollectibleKind::Gem => Reward {
                coins: 5,
                score: 50,
                invulnerable_ticks: None,
                burst: Burst {
                    count: 8,
                    spread: Vec3::new(3.0, 3.0, 2.0),
                    color: palette::BLUE,
                    life: 40,
                },
            },
            CollectibleKind::Powerup => Reward {
                coins: 0,
                score: 100,
                invulnerable_ticks: Some(POWERUP_INVULNERABLE_TICKS),
                burst: Burst {
                    count: 10,
                    spread: Vec3::new(4.0, 4.0, 2.0),
                    color: palette::RED,
                    life: 50,
                },
            },
        }
    }

    /// Spawn height above the path
    pub fn spawn_height(self) -> f32 {
        match self {
            CollectibleKind::Coin => 10.0,
            _ => 20.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollectibleKind::Coin => "coin",
            CollectibleKind::Gem => "gem",
            CollectibleKind::Powerup => "powerup",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub position: Vec3,
    pub kind: CollectibleKind,
    /// Spin angle in degrees (cosmetic)
    pub rotation: f32,
    pub size: i32,
    pub active: bool,
}

impl Collectible {
    pub fn new(position: Vec3, kind: CollectibleKind) -> Self {
        Self {
            position,
            kind,
            rotation: 0.0,
            size: COLLECTIBLE_SIZE,
            active: true,
        }
    }

    pub fn update(&mut self, player_z: f32) {
        self.rotation += COLLECTIBLE_SPIN;
        if self.position.z < player_z - COLLECTIBLE_CULL_DISTANCE {
            self.active = false;
        }
    }

    pub fn collision_rect(&self, camera: &Camera) -> ScreenRect {
        ScreenRect::around(camera.project(self.position), self.size, self.size)
    }
}
