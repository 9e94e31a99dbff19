//! Best score and local leaderboard, persisted as JSON under the XDG config dir.

use crate::PlayMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "hexshot";
const FILENAME: &str = "scores.json";
/// Entries kept on disk.
pub const LEADERBOARD_CAPACITY: usize = 50;
const MAX_NAME_LEN: usize = 20;
const DEFAULT_NAME: &str = "Player";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid score file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
    pub level: u32,
    pub combo: u32,
    pub mode: PlayMode,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFile {
    #[serde(default)]
    pub best_score: u32,
    #[serde(default)]
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// In-memory copy of the score file plus where it lives.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    data: ScoreFile,
}

/// `$XDG_CONFIG_HOME/hexshot/scores.json`, falling back to `~/.config`, then the working dir.
fn config_path() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join(APP_DIR).join(FILENAME)
}

impl Store {
    /// Open the default score file. Never fails; see [`Store::open_at`].
    pub fn open() -> Self {
        Self::open_at(config_path())
    }

    /// Load `path` best effort: a missing or unreadable file starts an empty store.
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match read_file(&path) {
            Ok(data) => data,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                ScoreFile::default()
            }
            Err(e) => {
                log::warn!("ignoring score file {}: {}", path.display(), e);
                ScoreFile::default()
            }
        };
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn best_score(&self) -> u32 {
        self.data.best_score
    }

    /// Raise the stored best score; lower values are ignored.
    pub fn record_best(&mut self, score: u32) {
        self.data.best_score = self.data.best_score.max(score);
    }

    /// Write `score` through to disk if it beats the stored best. Returns whether it did.
    pub fn save_best(&mut self, score: u32) -> Result<bool, StoreError> {
        if score <= self.data.best_score {
            return Ok(false);
        }
        self.data.best_score = score;
        self.save()?;
        Ok(true)
    }

    /// Add a finished round. Zero scores are not recorded. Returns the 1-based rank, if kept.
    pub fn submit(
        &mut self,
        player_name: &str,
        score: u32,
        level: u32,
        combo: u32,
        mode: PlayMode,
    ) -> Option<usize> {
        if score == 0 {
            return None;
        }
        self.record_best(score);
        let entry = LeaderboardEntry {
            player_name: sanitize_player_name(player_name),
            score,
            level,
            combo,
            mode,
            created_at: Utc::now(),
        };
        let board = &mut self.data.leaderboard;
        // Stable: earlier entries stay ahead on equal scores.
        let rank = board.partition_point(|e| e.score >= score);
        board.insert(rank, entry);
        board.truncate(LEADERBOARD_CAPACITY);
        (rank < LEADERBOARD_CAPACITY).then_some(rank + 1)
    }

    /// Highest `limit` entries, best first.
    pub fn top(&self, limit: usize) -> &[LeaderboardEntry] {
        let n = limit.min(self.data.leaderboard.len());
        &self.data.leaderboard[..n]
    }

    /// Write the file, creating the config directory if needed.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        log::debug!("saved scores to {}", self.path.display());
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<ScoreFile, StoreError> {
    let content = fs::read_to_string(path)?;
    let mut data: ScoreFile = serde_json::from_str(&content)?;
    data.leaderboard.sort_by(|a, b| b.score.cmp(&a.score));
    data.leaderboard.truncate(LEADERBOARD_CAPACITY);
    Ok(data)
}

/// Keep letters, digits, `_`, `-` and plain spaces (tabs and newlines are dropped), collapse
/// runs of spaces, cap the length.
pub fn sanitize_player_name(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();
    let name: String = filtered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_NAME_LEN)
        .collect();
    let name = name.trim_end();
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hexshot-test-{}-{}", std::process::id(), tag))
            .join(FILENAME)
    }

    #[test]
    fn test_sanitize_player_name() {
        assert_eq!(sanitize_player_name("  ada   lovelace "), "ada lovelace");
        assert_eq!(sanitize_player_name("x<script>y"), "xscripty");
        assert_eq!(sanitize_player_name("tab\there"), "tabhere");
        assert_eq!(sanitize_player_name("two\nlines  here"), "twolines here");
        assert_eq!(sanitize_player_name("!!!"), "Player");
        assert_eq!(sanitize_player_name(""), "Player");
        assert_eq!(sanitize_player_name(&"a".repeat(40)).len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_submit_orders_and_rejects_zero() {
        let mut store = Store::open_at(temp_path("order"));
        assert_eq!(store.submit("a", 0, 1, 0, PlayMode::Standard), None);
        assert_eq!(store.submit("a", 100, 1, 1, PlayMode::Standard), Some(1));
        assert_eq!(store.submit("b", 300, 2, 2, PlayMode::Zen), Some(1));
        assert_eq!(store.submit("c", 100, 1, 0, PlayMode::Standard), Some(3));
        let scores: Vec<u32> = store.top(10).iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 100, 100]);
        assert_eq!(store.top(10)[1].player_name, "a");
        assert_eq!(store.best_score(), 300);
        assert_eq!(store.top(1).len(), 1);
    }

    #[test]
    fn test_leaderboard_is_capped() {
        let mut store = Store::open_at(temp_path("cap"));
        for score in 1..=(LEADERBOARD_CAPACITY as u32 + 5) {
            store.submit("p", score, 1, 0, PlayMode::Standard);
        }
        assert_eq!(store.top(usize::MAX).len(), LEADERBOARD_CAPACITY);
        assert_eq!(store.submit("low", 1, 1, 0, PlayMode::Standard), None);
        assert_eq!(store.top(1)[0].score, LEADERBOARD_CAPACITY as u32 + 5);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("reload");
        let mut store = Store::open_at(&path);
        store.submit("ada", 420, 2, 3, PlayMode::Zen);
        store.record_best(500);
        store.save().unwrap();

        let reloaded = Store::open_at(&path);
        assert_eq!(reloaded.best_score(), 500);
        assert_eq!(reloaded.top(5).len(), 1);
        assert_eq!(reloaded.top(5)[0].mode, PlayMode::Zen);
        assert_eq!(reloaded.top(5)[0].player_name, "ada");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_best_survives_an_unfinished_round() {
        let path = temp_path("abandoned");
        let mut store = Store::open_at(&path);
        assert!(store.save_best(300).unwrap());
        assert!(!store.save_best(120).unwrap());

        // No submit and no explicit save: the round was never finished.
        let reloaded = Store::open_at(&path);
        assert_eq!(reloaded.best_score(), 300);
        assert!(reloaded.top(5).is_empty());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let store = Store::open_at(&path);
        assert_eq!(store.best_score(), 0);
        assert!(store.top(5).is_empty());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
