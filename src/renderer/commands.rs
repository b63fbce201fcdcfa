//! Draw commands handed to the rasterizer

use glam::IVec2;
use serde::Serialize;

use crate::Rgb;
use crate::sim::{CollectibleKind, ObstacleKind, PlayerState};

/// Roadside decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropKind {
    Tree,
    Ruin,
}

/// Heads-up display contents while playing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub coins: u32,
    /// Whole meters run
    pub distance: u32,
    pub speed_multiplier: f32,
    pub level: u32,
    /// JUMPING / SLIDING / INVULNERABLE banner
    pub status: Option<&'static str>,
}

/// End-of-run summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverSummary {
    pub score: u64,
    pub high_score: u64,
    pub new_record: bool,
    pub distance: u32,
    pub coins: u32,
    pub speed_multiplier: f32,
    pub level: u32,
}

/// One primitive in a frame, back to front. Positions are screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Title screen with the stored record
    Menu { high_score: u64 },
    /// Clear to sky color
    Sky,
    /// Square paving stone
    PathStone { center: IVec2, size: i32 },
    /// Round post along the path edge
    PathBorder { center: IVec2, radius: i32 },
    Prop {
        kind: PropKind,
        center: IVec2,
        size: i32,
        /// Per-prop tint offset in [-20, 20]
        shade: i32,
    },
    Obstacle {
        kind: ObstacleKind,
        center: IVec2,
        size: i32,
    },
    Collectible {
        kind: CollectibleKind,
        center: IVec2,
        size: i32,
        /// Spin angle in degrees
        rotation: f32,
    },
    Particle {
        center: IVec2,
        /// Already faded by remaining life
        color: Rgb,
        alpha: f32,
    },
    Player {
        center: IVec2,
        size: i32,
        pose: PlayerState,
        color: Rgb,
        animation_frame: u8,
    },
    Hud(Hud),
    GameOverOverlay(GameOverSummary),
    PauseOverlay,
}

impl DrawCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DrawCommand::Menu { .. } => "menu",
            DrawCommand::Sky => "sky",
            DrawCommand::PathStone { .. } => "path_stone",
            DrawCommand::PathBorder { .. } => "path_border",
            DrawCommand::Prop { .. } => "prop",
            DrawCommand::Obstacle { .. } => "obstacle",
            DrawCommand::Collectible { .. } => "collectible",
            DrawCommand::Particle { .. } => "particle",
            DrawCommand::Player { .. } => "player",
            DrawCommand::Hud(_) => "hud",
            DrawCommand::GameOverOverlay(_) => "game_over",
            DrawCommand::PauseOverlay => "pause",
        }
    }
}
