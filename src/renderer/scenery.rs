//! Path and roadside scenery
//!
//! Scenery is laid out in rows relative to the player and rebuilt every
//! frame. Prop jitter comes from a hash of the row so it stays put from
//! frame to frame.

use glam::Vec3;

use super::commands::{DrawCommand, PropKind};
use super::on_screen;
use crate::sim::Camera;

const PATH_ROWS: std::ops::Range<i32> = -5..20;
const PATH_ROW_SPACING: f32 = 50.0;
const STONES_PER_ROW: i32 = 3;
const STONE_SPACING: f32 = 15.0;
const STONE_Y: f32 = -5.0;
const BORDER_X: f32 = 120.0;

const PROP_ROWS: std::ops::Range<i32> = -3..15;
const PROP_ROW_SPACING: f32 = 80.0;
const PROP_COLUMNS: std::ops::Range<i32> = 2..5;
const PROP_INNER_X: f32 = 150.0;
const PROP_COLUMN_SPACING: f32 = 30.0;
const PROP_DRAW_DISTANCE: f32 = 800.0;
const PROP_JITTER: i32 = 20;

/// Scale a base size by depth, truncating and flooring at `min`
pub(crate) fn scaled(camera: &Camera, base: f32, z: f32, min: i32) -> i32 {
    ((base * camera.depth_scale(z)) as i32).max(min)
}

/// Hash to a value in [-range, range]
fn jitter(row: i32, column: i32, side: i32, range: i32) -> i32 {
    let h = (row as u32)
        .wrapping_mul(2654435761)
        .wrapping_add((column as u32).wrapping_mul(7919))
        .wrapping_add((side as u32).wrapping_mul(31337));
    let h = h ^ (h >> 15);
    (h % (2 * range as u32 + 1)) as i32 - range
}

/// Paving stones for the three lanes plus the edge posts
pub fn path(camera: &Camera, player_z: f32, out: &mut Vec<DrawCommand>) {
    for i in PATH_ROWS {
        let row_z = player_z + i as f32 * PATH_ROW_SPACING;

        for lane in -1..=1 {
            for j in 0..STONES_PER_ROW {
                let stone_z = row_z + j as f32 * STONE_SPACING;
                let center = camera.project(Vec3::new(crate::lane_x(lane), STONE_Y, stone_z));
                if on_screen(center) {
                    out.push(DrawCommand::PathStone {
                        center,
                        size: scaled(camera, 30.0, stone_z, 5),
                    });
                }
            }
        }

        for side in [-1.0, 1.0] {
            let center = camera.project(Vec3::new(side * BORDER_X, 0.0, row_z));
            if on_screen(center) {
                out.push(DrawCommand::PathBorder {
                    center,
                    radius: scaled(camera, 20.0, row_z, 3),
                });
            }
        }
    }
}

/// Trees and ruins on both sides of the path
pub fn environment(camera: &Camera, player_z: f32, out: &mut Vec<DrawCommand>) {
    for i in PROP_ROWS {
        let row_z = player_z + i as f32 * PROP_ROW_SPACING;
        if (row_z - camera.position.z).abs() >= PROP_DRAW_DISTANCE {
            continue;
        }
        let size = scaled(camera, 40.0, row_z, 5);

        for side in [-1, 1] {
            for j in PROP_COLUMNS {
                let x = side as f32 * (PROP_INNER_X + j as f32 * PROP_COLUMN_SPACING);
                let z = row_z + jitter(i, j, side, PROP_JITTER) as f32;
                let center = camera.project(Vec3::new(x, 0.0, z));
                if !on_screen(center) {
                    continue;
                }
                let kind = if (i + j).rem_euclid(3) == 0 {
                    PropKind::Tree
                } else {
                    PropKind::Ruin
                };
                out.push(DrawCommand::Prop {
                    kind,
                    center,
                    size,
                    shade: jitter(j, i, -side, PROP_JITTER),
                });
            }
        }
    }
}
