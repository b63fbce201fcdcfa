//! The runner: lane position, jump arc, slide and turn timers

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::ScreenRect;
use super::state::GameEvent;
use crate::consts::*;
use crate::lane_x;

/// Player action state. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Running,
    Jumping,
    Sliding,
    TurningLeft,
    TurningRight,
}

impl PlayerState {
    pub fn is_turning(self) -> bool {
        matches!(self, PlayerState::TurningLeft | PlayerState::TurningRight)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerState::Running => "RUNNING",
            PlayerState::Jumping => "JUMPING",
            PlayerState::Sliding => "SLIDING",
            PlayerState::TurningLeft => "TURNING_LEFT",
            PlayerState::TurningRight => "TURNING_RIGHT",
        }
    }
}

/// Leftmost and rightmost lanes
pub const MIN_LANE: i32 = -1;
pub const MAX_LANE: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Per-tick displacement (z is forward speed)
    pub velocity: Vec3,
    pub state: PlayerState,
    /// Committed lane in {-1, 0, 1}; x converges toward it
    pub lane: i32,
    /// Vertical speed while jumping
    pub jump_velocity: f32,
    pub slide_timer: i32,
    pub turn_timer: i32,
    pub invulnerable_timer: i32,
    /// Current run-cycle frame in [0, 4)
    pub animation_frame: u8,
    /// Footprint edge length (screen pixels)
    pub size: i32,
    #[serde(default)]
    animation_timer: u32,
    #[serde(default)]
    footstep_timer: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::new(0.0, 0.0, PLAYER_START_SPEED),
            state: PlayerState::Running,
            lane: 0,
            jump_velocity: 0.0,
            slide_timer: 0,
            turn_timer: 0,
            invulnerable_timer: 0,
            animation_frame: 0,
            size: PLAYER_SIZE,
            animation_timer: 0,
            footstep_timer: 0,
        }
    }

    /// Advance one tick. Footsteps are reported through `events`.
    pub fn update(&mut self, events: &mut Vec<GameEvent>) {
        self.position += self.velocity;

        if self.state == PlayerState::Jumping {
            self.position.y += self.jump_velocity;
            self.jump_velocity -= GRAVITY;

            if self.position.y <= 0.0 {
                self.position.y = 0.0;
                self.jump_velocity = 0.0;
                self.state = PlayerState::Running;
            }
        }

        if self.state == PlayerState::Sliding {
            self.slide_timer -= 1;
            if self.slide_timer <= 0 {
                self.state = PlayerState::Running;
            }
        }

        if self.state.is_turning() {
            self.turn_timer -= 1;
            if self.turn_timer <= 0 {
                self.state = PlayerState::Running;
            }
        }

        // Lane smoothing runs in every state, independent of the turn timer
        let target_x = lane_x(self.lane);
        self.position.x += (target_x - self.position.x) * LANE_BLEND;

        if self.invulnerable_timer > 0 {
            self.invulnerable_timer -= 1;
        }

        self.animation_timer += 1;
        if self.animation_timer >= ANIMATION_TICKS {
            self.animation_timer = 0;
            self.animation_frame = (self.animation_frame + 1) % ANIMATION_FRAMES;
        }

        if self.state == PlayerState::Running {
            self.footstep_timer -= 1;
            if self.footstep_timer <= 0 {
                events.push(GameEvent::Footstep);
                self.footstep_timer = FOOTSTEP_TICKS;
            }
        }
    }

    /// Start a jump. Only accepted while Running.
    pub fn jump(&mut self) -> bool {
        if self.state != PlayerState::Running {
            return false;
        }
        self.state = PlayerState::Jumping;
        self.jump_velocity = JUMP_VELOCITY;
        true
    }

    /// Start a slide. Only accepted while Running.
    pub fn slide(&mut self) -> bool {
        if self.state != PlayerState::Running {
            return false;
        }
        self.state = PlayerState::Sliding;
        self.slide_timer = SLIDE_TICKS;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.change_lane(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.change_lane(1)
    }

    /// Commit a lane change and start the turn. Only accepted while Running
    /// and when the new lane stays in bounds.
    fn change_lane(&mut self, direction: i32) -> bool {
        let lane = self.lane + direction;
        if self.state != PlayerState::Running || !(MIN_LANE..=MAX_LANE).contains(&lane) {
            return false;
        }
        self.lane = lane;
        self.state = if direction < 0 {
            PlayerState::TurningLeft
        } else {
            PlayerState::TurningRight
        };
        self.turn_timer = TURN_TICKS;
        true
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0
    }

    /// Screen-space footprint: full height normally, a quarter of it sliding
    pub fn collision_rect(&self, camera: &Camera) -> ScreenRect {
        let center = camera.project(self.position);
        if self.state == PlayerState::Sliding {
            ScreenRect::around(center, self.size, self.size / 2)
        } else {
            ScreenRect::around(center, self.size, self.size * 2)
        }
    }
}
