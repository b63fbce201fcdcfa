//! Sound effect routing
//!
//! The simulation never plays sounds. The harness feeds drained `GameEvent`s
//! through `AudioManager`, which maps them to effects, scales the per-effect
//! volume by the user's settings and hands them to an `AudioSink` backend.

use crate::settings::Settings;
use crate::sim::{CollectibleKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Rising chirp on takeoff
    Jump,
    /// Noise whoosh
    Slide,
    /// Bell-like ding
    Coin,
    /// Sparkle arpeggio
    Gem,
    /// Ascending sweep
    Powerup,
    /// Low noisy crash
    Collision,
    /// Short thud every few strides
    Footstep,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::Jump,
        SoundEffect::Slide,
        SoundEffect::Coin,
        SoundEffect::Gem,
        SoundEffect::Powerup,
        SoundEffect::Collision,
        SoundEffect::Footstep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Slide => "slide",
            SoundEffect::Coin => "coin",
            SoundEffect::Gem => "gem",
            SoundEffect::Powerup => "powerup",
            SoundEffect::Collision => "collision",
            SoundEffect::Footstep => "footstep",
        }
    }

    /// Mix level before user volume is applied
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Jump => 0.7,
            SoundEffect::Slide => 0.6,
            SoundEffect::Coin => 0.8,
            SoundEffect::Gem => 0.9,
            SoundEffect::Powerup => 0.8,
            SoundEffect::Collision => 1.0,
            SoundEffect::Footstep => 0.3,
        }
    }

    /// Effect triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Slid => Some(SoundEffect::Slide),
            GameEvent::Footstep => Some(SoundEffect::Footstep),
            GameEvent::Crashed { .. } => Some(SoundEffect::Collision),
            GameEvent::Collected { kind, .. } => Some(match kind {
                CollectibleKind::Coin => SoundEffect::Coin,
                CollectibleKind::Gem => SoundEffect::Gem,
                CollectibleKind::Powerup => SoundEffect::Powerup,
            }),
            _ => None,
        }
    }
}

/// Audio backend errors
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// No output device or the device went away
    #[error("audio device unavailable: {0}")]
    Unavailable(String),
}

/// Something that can actually make noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Discards every sound
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Writes each sound to the debug log, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("sfx {} @ {:.2}", effect.as_str(), volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    /// Settings volume, already muted and clamped
    volume: f32,
}

impl AudioManager {
    pub fn from_settings(sink: Box<dyn AudioSink>, settings: &Settings) -> Self {
        let mut audio = Self { sink, volume: 0.0 };
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play a sound effect. Backend failures are logged, never returned.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.volume * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play(effect, vol) {
            log::warn!("Audio: {}", e);
        }
    }

    /// Play whatever `event` calls for
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleKind;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every call; fails on demand
    #[derive(Default, Clone)]
    struct Recorder {
        played: Rc<RefCell<Vec<(SoundEffect, f32)>>>,
        fail: bool,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
            self.played.borrow_mut().push((effect, volume));
            if self.fail {
                Err(AudioError::Unavailable("unplugged".into()))
            } else {
                Ok(())
            }
        }
    }

    fn loud() -> Settings {
        Settings {
            master_volume: 1.0,
            ..Settings::default()
        }
    }

    fn manager(rec: &Recorder) -> AudioManager {
        AudioManager::from_settings(Box::new(rec.clone()), &loud())
    }

    #[test]
    fn test_event_mapping() {
        let collected = |kind| GameEvent::Collected {
            kind,
            position: Vec3::ZERO,
        };
        assert_eq!(
            SoundEffect::for_event(&collected(CollectibleKind::Gem)),
            Some(SoundEffect::Gem)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Crashed {
                obstacle: ObstacleKind::Gap
            }),
            Some(SoundEffect::Collision)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::LaneChanged { lane: 1 }), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::QuitRequested), None);
    }

    #[test]
    fn test_volume_scaling() {
        let rec = Recorder::default();
        let mut audio = manager(&rec);
        audio.apply_settings(&Settings {
            sfx_volume: 0.5,
            ..loud()
        });
        audio.handle_event(&GameEvent::Footstep);
        audio.handle_event(&GameEvent::Jumped);

        let played = rec.played.borrow();
        assert_eq!(played.len(), 2);
        assert_eq!(played[0].0, SoundEffect::Footstep);
        assert!((played[0].1 - 0.15).abs() < 1e-6);
        assert!((played[1].1 - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let rec = Recorder::default();
        let mut audio = manager(&rec);
        audio.apply_settings(&Settings {
            muted: true,
            ..Settings::default()
        });
        for effect in SoundEffect::ALL {
            audio.play(effect);
        }
        assert!(rec.played.borrow().is_empty());
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let rec = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut audio = manager(&rec);
        audio.play(SoundEffect::Coin);
        audio.play(SoundEffect::Coin);
        assert_eq!(rec.played.borrow().len(), 2);
    }
}
