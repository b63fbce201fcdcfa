//! Game session state and core simulation types
//!
//! One `GameState` owns every entity of a run. Nothing here performs I/O:
//! audio cues and high-score saves leave the simulation as `GameEvent`s.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entities::{Collectible, CollectibleKind, Obstacle, ObstacleKind};
use super::particles::{MAX_PARTICLES, ParticleSystem};
use super::player::Player;
use crate::consts::*;
use crate::palette;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run suspended, nothing advances
    Paused,
    /// Run ended, crash effect playing out
    GameOver,
}

/// Things that happened during a tick, for audio and persistence observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Slid,
    LaneChanged { lane: i32 },
    Footstep,
    Collected { kind: CollectibleKind, position: Vec3 },
    Crashed { obstacle: ObstacleKind },
    DifficultyIncreased { level: u32 },
    NewHighScore { score: u64 },
    PhaseChanged { from: GamePhase, to: GamePhase },
    QuitRequested,
}

/// Simulation-side knobs derived from user settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimOptions {
    /// Particle pool size (0 disables particles)
    pub particle_cap: usize,
    /// Shake the camera on a crash
    pub screen_shake: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            particle_cap: MAX_PARTICLES,
            screen_shake: true,
        }
    }
}

fn detached_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn, shake and particle randomness. Restored snapshots restart the stream.
    #[serde(skip, default = "detached_rng")]
    pub(crate) rng: Pcg32,
    pub options: SimOptions,
    pub phase: GamePhase,
    /// Distance-derived score plus every pickup bonus of the run
    pub score: u64,
    /// Pickup bonuses accumulated this run
    pub bonus_score: u64,
    pub coins: u32,
    pub distance: f32,
    pub speed_multiplier: f32,
    /// Level in [1, 10]
    pub difficulty: u32,
    pub obstacle_spawn_timer: i32,
    pub collectible_spawn_timer: i32,
    /// Best score across sessions
    pub high_score: u64,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    pub player: Player,
    pub camera: Camera,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Active collectibles in spawn order
    pub collectibles: Vec<Collectible>,
    pub particles: ParticleSystem,
    /// Last score multiple that raised the difficulty
    #[serde(default)]
    last_level_score: u64,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session on the title screen
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self::with_options(seed, high_score, SimOptions::default())
    }

    pub fn with_options(seed: u64, high_score: u64, options: SimOptions) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            options,
            phase: GamePhase::Menu,
            score: 0,
            bonus_score: 0,
            coins: 0,
            distance: 0.0,
            speed_multiplier: 1.0,
            difficulty: 1,
            obstacle_spawn_timer: 0,
            collectible_spawn_timer: 0,
            high_score,
            time_ticks: 0,
            player: Player::new(),
            camera: Camera::new(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: ParticleSystem::with_capacity(options.particle_cap),
            last_level_score: 0,
            events: Vec::new(),
        }
    }

    /// Start a fresh run. The high score and the RNG stream carry over.
    pub fn reset_game(&mut self) {
        self.player = Player::new();
        self.camera = Camera::new();
        self.obstacles.clear();
        self.collectibles.clear();
        self.particles = ParticleSystem::with_capacity(self.options.particle_cap);
        self.score = 0;
        self.bonus_score = 0;
        self.coins = 0;
        self.distance = 0.0;
        self.speed_multiplier = 1.0;
        self.difficulty = 1;
        self.obstacle_spawn_timer = 0;
        self.collectible_spawn_timer = 0;
        self.time_ticks = 0;
        self.last_level_score = 0;
    }

    /// Move to a new phase, emitting `PhaseChanged` when it differs
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        self.push_event(GameEvent::PhaseChanged { from, to });
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Advance the player, collecting its footstep cues
    pub(crate) fn update_player(&mut self) {
        self.player.update(&mut self.events);
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuild the score from distance, keeping all pickup bonuses
    pub fn recompute_score(&mut self) {
        let from_distance = (self.distance / DISTANCE_PER_POINT).floor().max(0.0) as u64;
        self.score = from_distance + self.bonus_score;
    }

    pub fn add_bonus_score(&mut self, points: u64) {
        self.bonus_score += points;
        self.score += points;
    }

    /// Raise the level when the score lands exactly on a new multiple of 500.
    ///
    /// Returns true when the level went up.
    pub fn update_difficulty(&mut self) -> bool {
        if self.score == 0
            || !self.score.is_multiple_of(SCORE_PER_LEVEL)
            || self.score == self.last_level_score
        {
            return false;
        }
        self.last_level_score = self.score;

        if self.difficulty >= MAX_DIFFICULTY {
            return false;
        }
        self.difficulty += 1;
        self.speed_multiplier += SPEED_MULTIPLIER_STEP;
        self.player.velocity.z += PLAYER_SPEED_STEP;

        log::info!(
            "Level {} at score {} (speed x{:.1})",
            self.difficulty,
            self.score,
            self.speed_multiplier
        );
        self.push_event(GameEvent::DifficultyIncreased {
            level: self.difficulty,
        });
        true
    }

    /// End the run after a fatal hit
    pub fn game_over(&mut self, obstacle: ObstacleKind) {
        self.push_event(GameEvent::Crashed { obstacle });
        self.set_phase(GamePhase::GameOver);

        if self.score > self.high_score {
            self.high_score = self.score;
            log::info!("New high score: {}", self.score);
            self.push_event(GameEvent::NewHighScore { score: self.score });
        }

        if self.options.screen_shake {
            self.camera.add_shake(CRASH_SHAKE_INTENSITY, CRASH_SHAKE_TICKS);
        }
        self.particles.burst(
            &mut self.rng,
            self.player.position,
            CRASH_PARTICLES,
            Vec3::new(5.0, 5.0, 3.0),
            palette::RED,
            CRASH_PARTICLE_LIFE,
        );
    }

    /// True when this run's score is the stored record
    pub fn is_new_record(&self) -> bool {
        self.score > 0 && self.score == self.high_score
    }
}
