//! High score persistence
//!
//! A single best score, stored as a small JSON record. LocalStorage on the
//! web, a JSON file natively, memory in tests.

use serde::{Deserialize, Serialize};

/// Key-value home of the best score
pub trait HighScoreStore {
    /// Stored best score, 0 when absent or unreadable
    fn load_high_score(&self) -> u32;

    /// Persist a new best score; failures are logged, never raised
    fn save_high_score(&mut self, score: u32);
}

/// Stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

impl HighScoreRecord {
    /// Decode a stored record; garbage reads as absent
    pub fn parse(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Ignoring unreadable high score record: {}", e);
                None
            }
        }
    }

    pub fn to_json(self) -> Option<String> {
        serde_json::to_string(&self).ok()
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: Option<u32>,
    /// Number of saves, for asserting the save-only-on-improvement rule
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            score: Some(score),
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> u32 {
        self.score.unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u32) {
        self.score = Some(score);
        self.saves += 1;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use self::native::JsonFileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use super::{HighScoreRecord, HighScoreStore};

    /// Record kept in a JSON file
    #[derive(Debug, Clone)]
    pub struct JsonFileStore {
        path: PathBuf,
    }

    impl JsonFileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    impl HighScoreStore for JsonFileStore {
        fn load_high_score(&self) -> u32 {
            match std::fs::read_to_string(&self.path) {
                Ok(json) => HighScoreRecord::parse(&json)
                    .map(|r| r.high_score)
                    .unwrap_or(0),
                Err(_) => {
                    log::info!("No high score at {}, starting fresh", self.path.display());
                    0
                }
            }
        }

        fn save_high_score(&mut self, score: u32) {
            let Some(json) = (HighScoreRecord { high_score: score }).to_json() else {
                return;
            };
            match std::fs::write(&self.path, json) {
                Ok(()) => log::info!("High score {} saved", score),
                Err(e) => log::warn!("Could not save high score to {}: {}", self.path.display(), e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{HighScoreRecord, HighScoreStore};

    /// Record kept in the browser's LocalStorage
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        const STORAGE_KEY: &'static str = "wrap_snake_highscore";

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl HighScoreStore for LocalStorageStore {
        fn load_high_score(&self) -> u32 {
            let score = Self::storage()
                .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
                .and_then(|json| HighScoreRecord::parse(&json))
                .map(|r| r.high_score)
                .unwrap_or(0);
            log::info!("Loaded high score {}", score);
            score
        }

        fn save_high_score(&mut self, score: u32) {
            let Some(storage) = Self::storage() else {
                log::warn!("LocalStorage unavailable - high score not saved");
                return;
            };
            if let Some(json) = (HighScoreRecord { high_score: score }).to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score {} saved", score);
            }
        }
    }
}
