//! Persistent best score
//!
//! Stored as `{"high_score": N}` in a JSON file. A missing or unreadable
//! file counts as no record; failed writes are logged and dropped so the
//! game never stops over a save.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistenceError};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.json";

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub high_score: u64,
}

impl HighScore {
    pub fn new(high_score: u64) -> Self {
        Self { high_score }
    }

    /// Load the record, falling back to zero
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match persistence::load_json::<HighScore>(path) {
            Ok(record) => {
                log::info!("Loaded high score {} from {}", record.high_score, path.display());
                record
            }
            Err(e) if e.is_not_found() => {
                log::info!("No high score at {}, starting fresh", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring high score file: {}", e);
                Self::default()
            }
        }
    }

    /// Write the record, reporting failures to the caller
    pub fn try_save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)
    }

    /// Write the record; failures are logged and swallowed
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.try_save(path) {
            Ok(()) => log::info!("High score {} saved", self.high_score),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }

    /// Raise the record if `score` beats it. Returns true when it did.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_file_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_HIGH_SCORE_FILE);
        HighScore::new(4321).save(&path);

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["high_score"], 4321);
        assert_eq!(HighScore::load(&path).high_score, 4321);
    }

    #[test]
    fn test_missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(HighScore::load(dir.path().join("none.json")).high_score, 0);
    }

    #[test]
    fn test_corrupt_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_HIGH_SCORE_FILE);
        fs::write(&path, "high score: lots").unwrap();
        assert_eq!(HighScore::load(&path).high_score, 0);

        fs::write(&path, r#"{"high_score": -5}"#).unwrap();
        assert_eq!(HighScore::load(&path).high_score, 0);
    }

    #[test]
    fn test_unwritable_path_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let path = dir.path().join("taken");
        fs::create_dir(path.with_extension("tmp")).unwrap();
        let record = HighScore::new(10);
        assert!(record.try_save(&path).is_err());
        record.save(&path);
    }

    #[test]
    fn test_record_only_raises() {
        let mut hs = HighScore::new(100);
        assert!(!hs.record(50));
        assert!(!hs.record(100));
        assert!(hs.record(101));
        assert_eq!(hs.high_score, 101);
    }
}
