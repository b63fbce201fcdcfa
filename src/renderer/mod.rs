//! Frame building
//!
//! Turns a `GameState` into an ordered list of `DrawCommand`s. The actual
//! rasterizing lives behind `FrameSink`, so everything here is testable
//! without a window.

pub mod commands;
pub mod scenery;

use glam::{IVec2, Vec3};

pub use commands::{DrawCommand, GameOverSummary, Hud, PropKind};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::{Rgb, palette};
use crate::sim::{GamePhase, GameState, Player, PlayerState};
use scenery::scaled;

/// Frame submission errors
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Output surface is gone (window closed, device lost)
    #[error("surface lost: {0}")]
    SurfaceLost(String),
}

/// Something that puts frames on a screen
pub trait FrameSink {
    fn submit(&mut self, frame: &[DrawCommand]) -> Result<(), RenderError>;
}

/// Drops every frame
#[derive(Debug, Default)]
pub struct NullFrameSink;

impl FrameSink for NullFrameSink {
    fn submit(&mut self, _frame: &[DrawCommand]) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Inclusive screen bounds test used for culling
pub(crate) fn on_screen(p: IVec2) -> bool {
    (0..=SCREEN_WIDTH).contains(&p.x) && (0..=SCREEN_HEIGHT).contains(&p.y)
}

/// Blinking tint while invulnerable
const INVULNERABLE_FLASH: Rgb = [255, 200, 200];

/// Body color for the current invulnerability state
pub fn player_color(player: &Player) -> Rgb {
    if player.invulnerable_timer > 0 {
        if (player.invulnerable_timer / 5) % 2 == 1 {
            INVULNERABLE_FLASH
        } else {
            palette::RED
        }
    } else {
        palette::BLUE
    }
}

/// Banner shown above the runner
pub fn status_text(player: &Player) -> Option<&'static str> {
    match player.state {
        PlayerState::Jumping => Some("JUMPING"),
        PlayerState::Sliding => Some("SLIDING"),
        _ if player.is_invulnerable() => Some("INVULNERABLE"),
        _ => None,
    }
}

/// Build the full draw list for the current phase
pub fn build_frame(state: &GameState) -> Vec<DrawCommand> {
    if state.phase == GamePhase::Menu {
        return vec![DrawCommand::Menu {
            high_score: state.high_score,
        }];
    }

    let camera = &state.camera;
    let mut out = vec![DrawCommand::Sky];

    scenery::path(camera, state.player.position.z, &mut out);
    scenery::environment(camera, state.player.position.z, &mut out);

    for obstacle in state.obstacles.iter().filter(|o| o.active) {
        let center = camera.project(obstacle.position);
        if on_screen(center) {
            out.push(DrawCommand::Obstacle {
                kind: obstacle.kind,
                center,
                size: scaled(camera, obstacle.size as f32, obstacle.position.z, 10),
            });
        }
    }

    for item in state.collectibles.iter().filter(|c| c.active) {
        let center = camera.project(item.position);
        if on_screen(center) {
            out.push(DrawCommand::Collectible {
                kind: item.kind,
                center,
                size: scaled(camera, item.size as f32, item.position.z, 5),
                rotation: item.rotation,
            });
        }
    }

    for p in state.particles.iter() {
        let center = camera.project(p.position);
        if !on_screen(center) {
            continue;
        }
        let alpha = p.alpha();
        let faded = Vec3::from_array(p.color.map(f32::from)) * alpha;
        out.push(DrawCommand::Particle {
            center,
            color: [faded.x as u8, faded.y as u8, faded.z as u8],
            alpha,
        });
    }

    let player = &state.player;
    out.push(DrawCommand::Player {
        center: camera.project(player.position),
        size: player.size,
        pose: player.state,
        color: player_color(player),
        animation_frame: player.animation_frame,
    });

    match state.phase {
        GamePhase::Playing => out.push(DrawCommand::Hud(Hud {
            score: state.score,
            coins: state.coins,
            distance: state.distance as u32,
            speed_multiplier: state.speed_multiplier,
            level: state.difficulty,
            status: status_text(player),
        })),
        GamePhase::Paused => out.push(DrawCommand::PauseOverlay),
        GamePhase::GameOver => out.push(DrawCommand::GameOverOverlay(GameOverSummary {
            score: state.score,
            high_score: state.high_score,
            new_record: state.is_new_record(),
            distance: state.distance as u32,
            coins: state.coins,
            speed_multiplier: state.speed_multiplier,
            level: state.difficulty,
        })),
        GamePhase::Menu => {}
    }

    out
}
