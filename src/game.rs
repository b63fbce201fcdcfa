//! Game harness
//!
//! Owns the session and its collaborators. Wall-clock time is converted to
//! fixed simulation ticks, events drained after every tick are routed to
//! audio and high-score persistence, and collaborator failures are logged
//! without ever interrupting the simulation.

use std::path::PathBuf;

use crate::audio::{AudioManager, AudioSink};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::renderer::{self, FrameSink};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Largest frame delta accepted before clamping (seconds)
const MAX_FRAME_DT: f32 = 0.1;

pub struct Game {
    state: GameState,
    high_score: HighScore,
    high_score_path: PathBuf,
    audio: AudioManager,
    frames: Box<dyn FrameSink>,
    accumulator: f32,
    input: TickInput,
    quit: bool,
    dropped_frames: u64,
}

impl Game {
    /// Build a session from settings, loading the stored high score
    pub fn new(settings: Settings, audio: Box<dyn AudioSink>, frames: Box<dyn FrameSink>) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let high_score_path = settings.high_score_path.clone();
        let high_score = HighScore::load(&high_score_path);
        let state = GameState::with_options(seed, high_score.high_score, settings.sim_options());
        log::info!(
            "New session (seed {}, high score {})",
            seed,
            high_score.high_score
        );

        Self {
            state,
            audio: AudioManager::from_settings(audio, &settings),
            high_score,
            high_score_path,
            frames,
            accumulator: 0.0,
            input: TickInput::default(),
            quit: false,
            dropped_frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Stored best score
    pub fn high_score(&self) -> u64 {
        self.high_score.high_score
    }

    /// True once a `QuitRequested` event has been seen
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Frames the sink refused so far
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames
    }

    /// Queue one-shot actions for the next tick. Flags accumulate until consumed.
    pub fn handle_input(&mut self, input: &TickInput) {
        self.input.move_left |= input.move_left;
        self.input.move_right |= input.move_right;
        self.input.jump |= input.jump;
        self.input.slide |= input.slide;
        self.input.back |= input.back;
        self.input.confirm |= input.confirm;
    }

    /// Demo mode stays on until switched off
    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.input.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.input.autopilot = enabled;
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Run as many fixed ticks as `dt` seconds cover. Returns the ticks run.
    /// A non-finite `dt` counts as no time passing.
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Advance exactly one tick and dispatch what it produced
    pub fn step(&mut self) {
        let input = self.input.clone();
        tick(&mut self.state, &input);

        // Clear one-shot inputs after processing
        self.input = TickInput {
            autopilot: input.autopilot,
            ..TickInput::default()
        };

        for event in self.state.drain_events() {
            self.dispatch(&event);
        }
    }

    fn dispatch(&mut self, event: &GameEvent) {
        self.audio.handle_event(event);

        match *event {
            GameEvent::NewHighScore { score } => {
                if self.high_score.record(score) {
                    self.high_score.save(&self.high_score_path);
                }
            }
            GameEvent::QuitRequested => self.quit = true,
            _ => {}
        }
    }

    /// Record the current run's score if it beats the stored one, e.g. when
    /// quitting mid-run. Returns true when a new record was written.
    pub fn save_high_score(&mut self) -> bool {
        if !self.high_score.record(self.state.score) {
            return false;
        }
        self.state.high_score = self.high_score.high_score;
        self.high_score.save(&self.high_score_path);
        true
    }

    /// Build the current frame and hand it to the sink
    pub fn render(&mut self) {
        let frame = renderer::build_frame(&self.state);
        if let Err(e) = self.frames.submit(&frame) {
            self.dropped_frames += 1;
            log::warn!("Render error: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, SoundEffect};
    use crate::renderer::{DrawCommand, RenderError};
    use crate::sim::{GamePhase, Obstacle, ObstacleKind};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Default, Clone)]
    struct Sounds(Rc<RefCell<Vec<SoundEffect>>>);

    impl AudioSink for Sounds {
        fn play(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
            self.0.borrow_mut().push(effect);
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    struct Frames {
        seen: Rc<RefCell<usize>>,
        fail: bool,
    }

    impl FrameSink for Frames {
        fn submit(&mut self, frame: &[DrawCommand]) -> Result<(), RenderError> {
            assert!(!frame.is_empty());
            *self.seen.borrow_mut() += 1;
            if self.fail {
                Err(RenderError::SurfaceLost("window closed".into()))
            } else {
                Ok(())
            }
        }
    }

    struct Harness {
        game: Game,
        sounds: Sounds,
        frames: Frames,
        dir: TempDir,
    }

    fn harness(fail_frames: bool) -> Harness {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            seed: Some(31),
            high_score_path: dir.path().join("high_score.json"),
            ..Settings::default()
        };
        let sounds = Sounds::default();
        let frames = Frames {
            fail: fail_frames,
            ..Frames::default()
        };
        let game = Game::new(settings, Box::new(sounds.clone()), Box::new(frames.clone()));
        Harness {
            game,
            sounds,
            frames,
            dir,
        }
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_timestep() {
        let mut h = harness(false);
        assert_eq!(h.game.update(SIM_DT * 0.5), 0);

        h.game.handle_input(&confirm());
        let ran = h.game.update(10.0);
        assert!(ran >= 1 && ran <= MAX_SUBSTEPS);
        assert_eq!(h.game.state().phase, GamePhase::Playing);
        assert_eq!(h.game.state().time_ticks, ran as u64);
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut h = harness(false);
        h.game.handle_input(&confirm());
        assert_eq!(h.game.update(f32::NAN), 0);
        assert_eq!(h.game.update(f32::INFINITY), 0);
        assert_eq!(h.game.update(f32::NEG_INFINITY), 0);
        assert!(h.game.update(SIM_DT * 2.0) >= 1);
        assert_eq!(h.game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_one_shot_inputs_clear() {
        let mut h = harness(false);
        h.game.handle_input(&confirm());
        h.game.step();
        h.game.handle_input(&TickInput {
            jump: true,
            ..Default::default()
        });
        for _ in 0..5 {
            h.game.step();
        }
        let jumps = h.sounds.0.borrow().iter().filter(|s| **s == SoundEffect::Jump).count();
        assert_eq!(jumps, 1);
        // Back was never pressed
        assert_eq!(h.game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_autopilot_persists() {
        let mut h = harness(false);
        h.game.set_autopilot(true);
        h.game.handle_input(&confirm());
        h.game.step();
        h.game.step();
        assert!(h.game.autopilot());
    }

    #[test]
    fn test_new_high_score_is_saved() {
        let mut h = harness(false);
        h.game.handle_input(&confirm());
        h.game.step();

        let z = h.game.state.player.position.z;
        h.game.state.distance = 4200.0;
        h.game.state.recompute_score();
        h.game
            .state
            .obstacles
            .push(Obstacle::new(glam::Vec3::new(0.0, 0.0, z + 100.0), ObstacleKind::Boulder, 0));
        while h.game.state().phase == GamePhase::Playing {
            h.game.step();
        }

        let score = h.game.state().score;
        assert!(score >= 420);
        assert_eq!(h.game.high_score(), score);
        assert!(h.sounds.0.borrow().contains(&SoundEffect::Collision));
        let stored = HighScore::load(h.dir.path().join("high_score.json"));
        assert_eq!(stored.high_score, score);
    }

    #[test]
    fn test_save_mid_run() {
        let mut h = harness(false);
        h.game.handle_input(&confirm());
        h.game.step();
        h.game.state.distance = 990.0;
        h.game.state.recompute_score();
        assert!(h.game.save_high_score());
        assert!(!h.game.save_high_score());
        assert_eq!(h.game.state().high_score, 99);
        assert_eq!(HighScore::load(h.dir.path().join("high_score.json")).high_score, 99);
    }

    #[test]
    fn test_quit_from_menu() {
        let mut h = harness(false);
        h.game.handle_input(&TickInput {
            back: true,
            ..Default::default()
        });
        h.game.step();
        assert!(h.game.quit_requested());
    }

    #[test]
    fn test_frame_failures_do_not_stop_the_game() {
        let mut h = harness(true);
        h.game.handle_input(&confirm());
        for _ in 0..3 {
            h.game.step();
            h.game.render();
        }
        assert_eq!(*h.frames.seen.borrow(), 3);
        assert_eq!(h.game.dropped_frames(), 3);
        assert_eq!(h.game.state().time_ticks, 3);
    }
}
