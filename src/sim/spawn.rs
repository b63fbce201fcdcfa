//! Procedural spawning of obstacles and collectibles
//!
//! Obstacles get denser and nastier with difficulty; collectibles keep a
//! steady random cadence.

use glam::Vec3;
use rand::Rng;

use super::entities::{Collectible, CollectibleKind, Obstacle, ObstacleKind};
use super::player::{MAX_LANE, MIN_LANE};
use super::state::GameState;
use crate::lane_x;

/// Obstacles spawn this far ahead of the player, plus up to `OBSTACLE_SPAWN_JITTER`
pub const OBSTACLE_SPAWN_AHEAD: f32 = 400.0;
pub const OBSTACLE_SPAWN_JITTER: u32 = 200;
/// Difficulty from which multi-lane walls can appear
pub const MULTI_LANE_DIFFICULTY: u32 = 4;
pub const MULTI_LANE_CHANCE: f64 = 0.3;

pub const COLLECTIBLE_SPAWN_AHEAD: f32 = 300.0;
pub const COLLECTIBLE_SPAWN_JITTER: u32 = 150;
pub const COIN_LINE_CHANCE: f64 = 0.4;
pub const COIN_LINE_LENGTH: usize = 3;
pub const COIN_LINE_SPACING: f32 = 30.0;
/// Collectible timer is reset to a value in [min, max)
pub const COLLECTIBLE_INTERVAL: (i32, i32) = (40, 80);

const LANES: [i32; 3] = [MIN_LANE, 0, MAX_LANE];

/// Obstacle types available at a difficulty level
pub fn obstacle_pool(difficulty: u32) -> &'static [ObstacleKind] {
    const POOL: [ObstacleKind; 5] = [
        ObstacleKind::Barrier,
        ObstacleKind::Gap,
        ObstacleKind::Boulder,
        ObstacleKind::MovingBarrier,
        ObstacleKind::SpikeTrap,
    ];
    match difficulty {
        0..=2 => &POOL[..3],
        3 | 4 => &POOL[..4],
        _ => &POOL,
    }
}

/// Ticks until the next obstacle; shrinks with difficulty down to 30
pub fn obstacle_spawn_interval(difficulty: u32) -> i32 {
    (90 - difficulty as i32 * 5).max(30)
}

/// Weighted collectible pool: 60% coin, 20% gem, 20% powerup
const COLLECTIBLE_POOL: [CollectibleKind; 5] = [
    CollectibleKind::Coin,
    CollectibleKind::Coin,
    CollectibleKind::Coin,
    CollectibleKind::Gem,
    CollectibleKind::Powerup,
];

fn random_lane<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    LANES[rng.random_range(0..LANES.len())]
}

/// Spawn one obstacle, or at higher levels sometimes a wall across two lanes
pub fn spawn_obstacle(state: &mut GameState) {
    let rng = &mut state.rng;
    let spawn_z =
        state.player.position.z + OBSTACLE_SPAWN_AHEAD + rng.random_range(0..OBSTACLE_SPAWN_JITTER) as f32;

    let pool = obstacle_pool(state.difficulty);
    let kind = pool[rng.random_range(0..pool.len())];

    if state.difficulty >= MULTI_LANE_DIFFICULTY && rng.random_bool(MULTI_LANE_CHANCE) {
        let safe_lane = random_lane(rng);
        for lane in LANES.into_iter().filter(|&l| l != safe_lane) {
            let pos = Vec3::new(lane_x(lane), 0.0, spawn_z);
            state.obstacles.push(Obstacle::new(pos, kind, lane));
        }
        log::debug!(
            "Spawned {} wall at z={:.0}, safe lane {}",
            kind.as_str(),
            spawn_z,
            safe_lane
        );
    } else {
        let lane = random_lane(rng);
        let pos = Vec3::new(lane_x(lane), 0.0, spawn_z);
        state.obstacles.push(Obstacle::new(pos, kind, lane));
        log::debug!("Spawned {} in lane {} at z={:.0}", kind.as_str(), lane, spawn_z);
    }
}

/// Spawn a line of center-lane coins or a single random pickup
pub fn spawn_collectible(state: &mut GameState) {
    let rng = &mut state.rng;
    let spawn_z = state.player.position.z
        + COLLECTIBLE_SPAWN_AHEAD
        + rng.random_range(0..COLLECTIBLE_SPAWN_JITTER) as f32;

    let kind = COLLECTIBLE_POOL[rng.random_range(0..COLLECTIBLE_POOL.len())];

    if rng.random_bool(COIN_LINE_CHANCE) {
        let height = CollectibleKind::Coin.spawn_height();
        for i in 0..COIN_LINE_LENGTH {
            let pos = Vec3::new(0.0, height, spawn_z + i as f32 * COIN_LINE_SPACING);
            state.collectibles.push(Collectible::new(pos, CollectibleKind::Coin));
        }
    } else {
        let lane = random_lane(rng);
        let pos = Vec3::new(lane_x(lane), kind.spawn_height(), spawn_z);
        state.collectibles.push(Collectible::new(pos, kind));
    }
}

/// Next collectible timer value
pub fn collectible_spawn_interval<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(COLLECTIBLE_INTERVAL.0..COLLECTIBLE_INTERVAL.1)
}

/// Count down both spawn timers, spawning and rearming when they expire
pub fn tick_spawners(state: &mut GameState) {
    state.obstacle_spawn_timer -= 1;
    if state.obstacle_spawn_timer <= 0 {
        spawn_obstacle(state);
        state.obstacle_spawn_timer = obstacle_spawn_interval(state.difficulty);
    }

    state.collectible_spawn_timer -= 1;
    if state.collectible_spawn_timer <= 0 {
        spawn_collectible(state);
        state.collectible_spawn_timer = collectible_spawn_interval(&mut state.rng);
    }
}
