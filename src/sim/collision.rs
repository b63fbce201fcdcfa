//! Screen-space collision detection and response
//!
//! Everything is tested after projection: the player and entities are
//! axis-aligned rectangles centered on their projected positions. The player's
//! rectangle shrinks while sliding, which is what lets a slide clear a
//! barrier; jumping clears a gap by rule.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entities::Collectible;
use super::state::{GameEvent, GameState};

/// Integer screen rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn around(center: IVec2, w: i32, h: i32) -> Self {
        Self::new(center.x - w / 2, center.y - h / 2, w, h)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap; touching edges and empty rectangles never collide
    pub fn intersects(&self, other: &ScreenRect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Run obstacle then collectible checks for this tick.
///
/// The first fatal obstacle ends the run and skips the remaining checks.
pub fn check_collisions(state: &mut GameState) {
    let player_rect = state.player.collision_rect(&state.camera);

    if !state.player.is_invulnerable() {
        let player = &state.player;
        let camera = &state.camera;
        let fatal = state
            .obstacles
            .iter()
            .filter(|o| o.active && (o.lane - player.lane).abs() < 1)
            .find(|o| {
                player_rect.intersects(&o.collision_rect(camera)) && !o.kind.avoided_by(player.state)
            })
            .map(|o| o.kind);

        if let Some(kind) = fatal {
            state.game_over(kind);
            return;
        }
    }

    let camera = &state.camera;
    let mut collected: Vec<Collectible> = Vec::new();
    state.collectibles.retain(|c| {
        if c.active && player_rect.intersects(&c.collision_rect(camera)) {
            collected.push(c.clone());
            false
        } else {
            true
        }
    });

    for mut item in collected {
        item.active = false;
        collect_item(state, &item);
    }
}

/// Apply a pickup's reward: coins, bonus score, invulnerability, particles
pub fn collect_item(state: &mut GameState, item: &Collectible) {
    let reward = item.kind.reward();

    state.coins += reward.coins;
    state.add_bonus_score(reward.score);
    if let Some(ticks) = reward.invulnerable_ticks {
        state.player.invulnerable_timer = ticks;
    }

    let burst = reward.burst;
    state.particles.burst(
        &mut state.rng,
        item.position,
        burst.count,
        burst.spread,
        burst.color,
        burst.life,
    );

    state.push_event(GameEvent::Collected {
        kind: item.kind,
        position: item.position,
    });
}
