//! High score persistence
//!
//! The game loop only sees the [`HighScoreStore`] trait. The file store keeps
//! the score as a bare decimal integer in a plain text file, so the file can
//! be inspected or edited by hand.

use anyhow::{Context, Result};
use log::warn;
use std::path::{Path, PathBuf};

/// Where the best score survives between sessions
pub trait HighScoreStore {
    /// Stored high score, 0 when nothing usable is stored
    fn load(&self) -> u32;

    /// Replace the stored high score
    fn save(&mut self, score: u32) -> Result<()>;
}

/// High score kept in a plain text file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return 0,
        };

        match contents.trim().parse() {
            Ok(score) => score,
            Err(_) => {
                warn!(
                    "Ignoring malformed high score file {:?}: {:?}",
                    self.path, contents
                );
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// In-memory store, counts how often it was written
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub score: u32,
    pub saves: usize,
}

impl MemoryHighScoreStore {
    pub fn new(score: u32) -> Self {
        Self { score, saves: 0 }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.score = score;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let store = FileHighScoreStore::new(dir.path().join("highscore.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_malformed_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.txt");

        for garbage in ["", "abc", "-4", "12 apples"] {
            std::fs::write(&path, garbage).unwrap();
            assert_eq!(FileHighScoreStore::new(&path).load(), 0);
        }
    }

    #[test]
    fn test_save_writes_bare_decimal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("highscore.txt");
        let mut store = FileHighScoreStore::new(&path);

        store.save(42).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "42");
        assert_eq!(store.load(), 42);

        store.save(7).unwrap();
        assert_eq!(store.load(), 7);
    }

    #[test]
    fn test_trailing_newline_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("highscore.txt");
        std::fs::write(&path, "15\n").unwrap();
        assert_eq!(FileHighScoreStore::new(&path).load(), 15);
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryHighScoreStore::new(3);
        assert_eq!(store.load(), 3);
        store.save(9).unwrap();
        assert_eq!(store.load(), 9);
        assert_eq!(store.saves, 1);
    }
}
