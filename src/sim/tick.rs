//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within a
//! Playing tick the order is fixed: player, camera, distance/score,
//! difficulty, spawners, entities, particles, collisions. Later stages read
//! what earlier stages wrote in the same tick.

use super::collision::check_collisions;
use super::entities::ObstacleKind;
use super::player::{MAX_LANE, MIN_LANE};
use super::spawn::tick_spawners;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub slide: bool,
    /// Pause / resume / back out of a screen
    pub back: bool,
    /// Start a run / leave the game-over screen
    pub confirm: bool,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

/// Autopilot look-ahead window, in world units relative to the player
pub const AUTOPILOT_LOOKAHEAD: f32 = 250.0;
const AUTOPILOT_BEHIND: f32 = 80.0;
/// Distances at which a boxed-in autopilot commits to a slide or a jump
const SLIDE_TRIGGER: f32 = 70.0;
const JUMP_TRIGGER: f32 = 160.0;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                state.reset_game();
                state.set_phase(GamePhase::Playing);
            } else {
                if input.back {
                    state.push_event(GameEvent::QuitRequested);
                }
                return;
            }
        }
        GamePhase::Playing => {
            if input.back {
                state.set_phase(GamePhase::Paused);
                return;
            }
        }
        GamePhase::Paused => {
            if input.back {
                state.set_phase(GamePhase::Playing);
            } else {
                return;
            }
        }
        GamePhase::GameOver => {
            if input.confirm {
                state.set_phase(GamePhase::Menu);
            } else if input.back {
                state.push_event(GameEvent::QuitRequested);
            }
            // Let the crash shake and debris play out
            let position = state.player.position;
            state.camera.update(position, &mut state.rng);
            state.particles.update();
            return;
        }
    }

    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        input.clone()
    };
    apply_actions(state, &input);
    step_playing(state);
}

/// Feed player actions in a fixed order, reporting the ones that took effect
fn apply_actions(state: &mut GameState, input: &TickInput) {
    if input.move_left && state.player.move_left() {
        let lane = state.player.lane;
        state.push_event(GameEvent::LaneChanged { lane });
    }
    if input.move_right && state.player.move_right() {
        let lane = state.player.lane;
        state.push_event(GameEvent::LaneChanged { lane });
    }
    if input.jump && state.player.jump() {
        state.push_event(GameEvent::Jumped);
    }
    if input.slide && state.player.slide() {
        state.push_event(GameEvent::Slid);
    }
}

/// One Playing tick
fn step_playing(state: &mut GameState) {
    state.time_ticks += 1;

    state.update_player();
    state.camera.update(state.player.position, &mut state.rng);

    state.distance += state.player.velocity.z * state.speed_multiplier;
    state.recompute_score();
    state.update_difficulty();

    tick_spawners(state);

    let player_z = state.player.position.z;
    for obstacle in &mut state.obstacles {
        obstacle.update(player_z);
    }
    state.obstacles.retain(|o| o.active);

    for collectible in &mut state.collectibles {
        collectible.update(player_z);
    }
    state.collectibles.retain(|c| c.active);

    state.particles.update();

    check_collisions(state);
}

/// Pick actions for demo mode from the obstacles just ahead.
///
/// Changing lane is always preferred since lane tags decide collisions
/// immediately; a slide or jump is only used when every lane is blocked.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = &state.player;
    let z = player.position.z;
    let threat_in = |lane: i32| {
        state
            .obstacles
            .iter()
            .filter(|o| o.active && o.lane == lane)
            .map(|o| (o.kind, o.position.z - z))
            .filter(|(_, ahead)| *ahead > -AUTOPILOT_BEHIND && *ahead < AUTOPILOT_LOOKAHEAD)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    };

    let mut input = TickInput::default();
    let Some((kind, ahead)) = threat_in(player.lane) else {
        return input;
    };

    // Step one lane per tick toward the nearest clear lane
    let clear_lane = (MIN_LANE..=MAX_LANE)
        .filter(|&l| l != player.lane && threat_in(l).is_none())
        .min_by_key(|l| (l - player.lane).abs());

    match clear_lane {
        Some(l) if l < player.lane => input.move_left = true,
        Some(_) => input.move_right = true,
        None => match kind {
            ObstacleKind::Barrier => input.slide = ahead < SLIDE_TRIGGER,
            ObstacleKind::Gap => input.jump = ahead < JUMP_TRIGGER,
            _ => {}
        },
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entities::{Collectible, CollectibleKind, Obstacle};
    use glam::Vec3;
    use proptest::prelude::*;

    fn start() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn back() -> TickInput {
        TickInput {
            back: true,
            ..Default::default()
        }
    }

    /// Playing session with spawning held off
    fn quiet_playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, 0);
        tick(&mut state, &start());
        state.obstacles.clear();
        state.collectibles.clear();
        state
    }

    fn quiet_tick(state: &mut GameState) {
        state.obstacle_spawn_timer = i32::MAX;
        state.collectible_spawn_timer = i32::MAX;
        tick(state, &TickInput::default());
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(12345, 0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &start());
        assert_eq!(state.phase, GamePhase::Playing);
        // Starting tick also simulates
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.player.position.z, PLAYER_START_SPEED);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = quiet_playing(12345);
        tick(&mut state, &back());
        assert_eq!(state.phase, GamePhase::Paused);

        let z = state.player.position.z;
        let ticks = state.time_ticks;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.position.z, z);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &back());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.position.z > z);
    }

    #[test]
    fn test_game_over_back_to_menu() {
        let mut state = quiet_playing(1);
        state.game_over(ObstacleKind::Boulder);
        let z = state.player.position.z;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.position.z, z);

        tick(&mut state, &start());
        assert_eq!(state.phase, GamePhase::Menu);
        tick(&mut state, &back());
        assert!(state.drain_events().contains(&GameEvent::QuitRequested));
    }

    #[test]
    fn test_crash_effects_play_out_after_game_over() {
        let mut state = quiet_playing(1);
        state.game_over(ObstacleKind::Boulder);
        for _ in 0..CRASH_SHAKE_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.camera.is_shaking());
        for _ in 0..CRASH_PARTICLE_LIFE {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_actions_emit_events() {
        let mut state = quiet_playing(3);
        state.drain_events();
        let input = TickInput {
            jump: true,
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LaneChanged { lane: -1 }));
        // Lane change put the player in a turn, so the jump is rejected
        assert!(!events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_first_difficulty_step_at_distance_5000() {
        let mut state = quiet_playing(7);
        let start_speed = state.player.velocity.z;
        while state.distance < 5000.0 {
            quiet_tick(&mut state);
            assert_eq!(state.phase, GamePhase::Playing);
        }
        assert_eq!(state.score, 500);
        assert_eq!(state.difficulty, 2);
        assert!((state.speed_multiplier - 1.1).abs() < 1e-6);
        assert!((state.player.velocity.z - (start_speed + 0.5)).abs() < 1e-6);

        // Score stays at 500 for another tick; no second step
        quiet_tick(&mut state);
        assert_eq!(state.difficulty, 2);
    }

    #[test]
    fn test_obstacles_culled_behind_player() {
        let mut state = quiet_playing(4);
        let z = state.player.position.z;
        state
            .obstacles
            .push(Obstacle::new(Vec3::new(60.0, 0.0, z - 295.0), ObstacleKind::Gap, 1));
        state
            .collectibles
            .push(Collectible::new(Vec3::new(60.0, 20.0, z - 95.0), CollectibleKind::Gem));
        quiet_tick(&mut state);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn test_runs_end_eventually() {
        let mut state = GameState::new(2024, 0);
        tick(&mut state, &start());
        let mut ticks = 0;
        while state.phase == GamePhase::Playing && ticks < 100_000 {
            tick(&mut state, &TickInput::default());
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, 0);
        let mut state2 = GameState::new(99999, 0);

        let inputs = [
            start(),
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                jump: true,
                ..Default::default()
            },
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.player.position, state2.player.position);
    }

    fn wall(state: &mut GameState, kind: ObstacleKind, ahead: f32, lanes: &[i32]) {
        let z = state.player.position.z + ahead;
        for &lane in lanes {
            let pos = Vec3::new(crate::lane_x(lane), 0.0, z);
            state.obstacles.push(Obstacle::new(pos, kind, lane));
        }
    }

    #[test]
    fn test_autopilot_prefers_changing_lane() {
        let mut state = quiet_playing(5);
        wall(&mut state, ObstacleKind::Barrier, 100.0, &[0]);
        let input = autopilot_input(&state);
        assert!(input.move_left);
        assert!(!input.slide);

        // Only the far lane is open: step toward it
        state.obstacles.clear();
        state.player.lane = -1;
        wall(&mut state, ObstacleKind::Boulder, 200.0, &[-1, 0]);
        assert!(autopilot_input(&state).move_right);
    }

    #[test]
    fn test_autopilot_boxed_in() {
        let mut state = quiet_playing(5);
        wall(&mut state, ObstacleKind::Barrier, 150.0, &[-1, 0, 1]);
        assert!(!autopilot_input(&state).slide);
        state.obstacles.clear();
        wall(&mut state, ObstacleKind::Barrier, 50.0, &[-1, 0, 1]);
        assert!(autopilot_input(&state).slide);

        state.obstacles.clear();
        wall(&mut state, ObstacleKind::Gap, 100.0, &[-1, 0, 1]);
        assert!(autopilot_input(&state).jump);
    }

    #[test]
    fn test_autopilot_idle_when_clear() {
        let mut state = quiet_playing(5);
        wall(&mut state, ObstacleKind::Boulder, 400.0, &[0]);
        let input = autopilot_input(&state);
        assert!(!(input.move_left || input.move_right || input.jump || input.slide));
    }

    #[test]
    fn test_autopilot_clears_course_idle_runner_crashes() {
        let course = |autopilot: bool| {
            let mut state = quiet_playing(77);
            wall(&mut state, ObstacleKind::Boulder, 200.0, &[0]);
            wall(&mut state, ObstacleKind::Barrier, 600.0, &[-1]);
            wall(&mut state, ObstacleKind::Gap, 1000.0, &[1]);
            let finish = state.player.position.z + 1200.0;
            let input = TickInput {
                autopilot,
                ..Default::default()
            };
            while state.phase == GamePhase::Playing && state.player.position.z < finish {
                state.obstacle_spawn_timer = i32::MAX;
                state.collectible_spawn_timer = i32::MAX;
                tick(&mut state, &input);
            }
            state
        };

        let idle = course(false);
        assert_eq!(idle.phase, GamePhase::GameOver);

        let auto = course(true);
        assert_eq!(auto.phase, GamePhase::Playing);
        assert!(auto.time_ticks > idle.time_ticks);
        assert_eq!(auto.player.lane, 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_score_never_decreases(seed in any::<u64>(), actions in proptest::collection::vec(0u8..6, 1..400)) {
            let mut state = GameState::new(seed, 0);
            tick(&mut state, &start());
            let mut last = state.score;
            for a in actions {
                if state.phase != GamePhase::Playing { break; }
                let input = TickInput {
                    move_left: a == 1,
                    move_right: a == 2,
                    jump: a == 3,
                    slide: a == 4,
                    ..Default::default()
                };
                tick(&mut state, &input);
                prop_assert!(state.score >= last);
                prop_assert!((1..=MAX_DIFFICULTY).contains(&state.difficulty));
                last = state.score;
            }
        }
    }
}
