//! Temple Runner - An endless runner down a three-lane temple path
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, camera, spawning, collisions)
//! - `renderer`: Draw-command generation for an external rasterizer
//! - `audio`: Sound effect catalogue and event-driven playback routing
//! - `game`: Fixed-timestep harness wiring the simulation to its collaborators
//! - `persistence`: JSON save/load helpers
//! - `settings`: User preferences

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation rate; every timer in the game counts these ticks
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 1200;
    pub const SCREEN_HEIGHT: i32 = 800;

    /// Pinhole camera focal length
    pub const FOV: f32 = 500.0;
    /// Minimum relative depth used by the projection
    pub const NEAR_CLIP: f32 = 0.1;
    /// Camera starts below and behind the origin
    pub const CAMERA_START: [f32; 3] = [0.0, -50.0, -200.0];
    /// Camera trails the player by this many units
    pub const CAMERA_FOLLOW_DISTANCE: f32 = 200.0;
    /// Fraction of the player's x the camera follows
    pub const CAMERA_X_FOLLOW: f32 = 0.3;
    /// Per-tick blend toward the follow target
    pub const CAMERA_BLEND: f32 = 0.1;

    /// Lane spacing along x
    pub const LANE_WIDTH: f32 = 60.0;
    /// Lane smoothing factor per tick
    pub const LANE_BLEND: f32 = 0.2;

    /// Player defaults
    pub const PLAYER_SIZE: i32 = 20;
    pub const PLAYER_START_SPEED: f32 = 8.0;
    pub const JUMP_VELOCITY: f32 = 18.0;
    pub const GRAVITY: f32 = 1.2;
    pub const SLIDE_TICKS: i32 = 30;
    pub const TURN_TICKS: i32 = 10;
    pub const ANIMATION_TICKS: u32 = 10;
    pub const ANIMATION_FRAMES: u8 = 4;
    pub const FOOTSTEP_TICKS: i32 = 20;

    /// Entity footprints
    pub const OBSTACLE_SIZE: i32 = 30;
    pub const COLLECTIBLE_SIZE: i32 = 15;
    /// Entities are culled once this far behind the player
    pub const OBSTACLE_CULL_DISTANCE: f32 = 300.0;
    pub const COLLECTIBLE_CULL_DISTANCE: f32 = 100.0;
    /// Collectible spin per tick (degrees)
    pub const COLLECTIBLE_SPIN: f32 = 5.0;

    /// Difficulty progression
    pub const MAX_DIFFICULTY: u32 = 10;
    pub const SCORE_PER_LEVEL: u64 = 500;
    pub const SPEED_MULTIPLIER_STEP: f32 = 0.1;
    pub const PLAYER_SPEED_STEP: f32 = 0.5;
    /// Distance units per point of score
    pub const DISTANCE_PER_POINT: f32 = 10.0;

    /// Powerup invulnerability (3 seconds)
    pub const POWERUP_INVULNERABLE_TICKS: i32 = 180;

    /// Crash effect
    pub const CRASH_SHAKE_INTENSITY: f32 = 10.0;
    pub const CRASH_SHAKE_TICKS: u32 = 30;
    pub const CRASH_PARTICLES: usize = 20;
    pub const CRASH_PARTICLE_LIFE: i32 = 60;
}

/// World-space x of a lane's centerline
#[inline]
pub fn lane_x(lane: i32) -> f32 {
    lane as f32 * consts::LANE_WIDTH
}

/// RGB color triple
pub type Rgb = [u8; 3];

/// Palette shared by the simulation (particle colors) and the renderer
pub mod palette {
    use super::Rgb;

    pub const BLACK: Rgb = [0, 0, 0];
    pub const WHITE: Rgb = [255, 255, 255];
    pub const BROWN: Rgb = [139, 69, 19];
    pub const GREEN: Rgb = [34, 139, 34];
    pub const GOLD: Rgb = [255, 215, 0];
    pub const RED: Rgb = [255, 0, 0];
    pub const BLUE: Rgb = [0, 100, 255];
    pub const GRAY: Rgb = [128, 128, 128];
    pub const DARK_GREEN: Rgb = [0, 100, 0];
    pub const STONE: Rgb = [105, 105, 105];
}
