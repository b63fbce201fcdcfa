//! Follow camera with screen shake and pinhole projection
//!
//! The projection here is the only world-to-screen transform in the game:
//! the renderer and every collision check go through it.

use glam::{IVec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Viewpoint trailing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// World-space eye position
    pub position: Vec3,
    /// Maximum jitter per axis while shaking
    pub shake_intensity: f32,
    /// Ticks of shake remaining
    pub shake_duration: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(CAMERA_START),
            shake_intensity: 0.0,
            shake_duration: 0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Damp toward the follow target, then apply any pending shake.
    ///
    /// The target keeps the current height; only x and z are followed.
    pub fn update<R: Rng + ?Sized>(&mut self, player_position: Vec3, rng: &mut R) {
        let target_x = player_position.x * CAMERA_X_FOLLOW;
        let target_z = player_position.z - CAMERA_FOLLOW_DISTANCE;

        self.position.x += (target_x - self.position.x) * CAMERA_BLEND;
        self.position.z += (target_z - self.position.z) * CAMERA_BLEND;

        if self.is_shaking() {
            let i = self.shake_intensity;
            self.position.x += rng.random_range(-i..=i);
            self.position.y += rng.random_range(-i..=i);
            self.shake_duration -= 1;
        }
    }

    /// Start a shake, replacing any shake in progress
    pub fn add_shake(&mut self, intensity: f32, duration: u32) {
        self.shake_intensity = intensity.abs();
        self.shake_duration = duration;
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_duration > 0
    }

    /// Project a world point to integer screen coordinates.
    ///
    /// Relative depth is floored at `NEAR_CLIP` so points at or behind the
    /// camera never divide by zero or flip sides.
    pub fn project(&self, point: Vec3) -> IVec2 {
        let rel = point - self.position;
        let rel_z = rel.z.max(NEAR_CLIP);

        let screen_x = rel.x * FOV / rel_z + (SCREEN_WIDTH / 2) as f32;
        let screen_y = rel.y * FOV / rel_z + (SCREEN_HEIGHT / 2) as f32;

        IVec2::new(screen_x as i32, screen_y as i32)
    }

    /// Perspective size scale used for sprites at a given world depth
    pub fn depth_scale(&self, z: f32) -> f32 {
        let distance = (z - self.position.z).abs();
        FOV / (distance + 100.0)
    }
}
