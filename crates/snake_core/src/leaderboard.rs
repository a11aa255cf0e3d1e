//! Per-difficulty top-10 score table, persisted as JSON under `saves/`.
//!
//! Persistence is deliberately forgiving: a missing or corrupt file loads
//! as an empty table, and a failed write is logged and dropped. Nothing
//! here may block gameplay.

use crate::difficulty::Difficulty;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const MAX_SCORES: usize = 10;
pub const MAX_NAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Keep only the characters the name input accepts (alphanumeric and
/// space), bounded to `MAX_NAME_LEN`, with surrounding whitespace removed.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .take(MAX_NAME_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

pub struct Leaderboard {
    difficulty: Difficulty,
    saves_dir: PathBuf,
    scores: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn load(difficulty: Difficulty) -> Self {
        Self::load_from_dir("saves", difficulty)
    }

    /// Load from an explicit directory; tests point this at a temp dir.
    pub fn load_from_dir(saves_dir: impl Into<PathBuf>, difficulty: Difficulty) -> Self {
        let mut board = Self {
            difficulty,
            saves_dir: saves_dir.into(),
            scores: Vec::new(),
        };

        let path = board.file_path();
        if !path.exists() {
            return board;
        }

        match fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))
            .and_then(|raw| {
                serde_json::from_str::<Vec<ScoreEntry>>(&raw)
                    .map_err(|e| format!("Failed to parse {}: {e}", path.display()))
            }) {
            Ok(scores) => {
                board.scores = scores;
                // Repair files edited by hand so in-memory ordering holds.
                board.scores.sort_by(|a, b| b.score.cmp(&a.score));
                board.scores.truncate(MAX_SCORES);
            }
            Err(err) => {
                log::warn!("Leaderboard load failed, starting empty: {err}");
            }
        }
        board
    }

    fn file_path(&self) -> PathBuf {
        self.saves_dir
            .join(format!("leaderboard_{}.json", self.difficulty.index()))
    }

    /// True when the table has room, or the score beats the 10th place.
    pub fn is_high_score(&self, score: u32) -> bool {
        if self.scores.len() < MAX_SCORES {
            return true;
        }
        score > self.scores[self.scores.len() - 1].score
    }

    /// Insert, re-sort descending (stable, so earlier entries win ties),
    /// truncate to the top 10, and persist.
    pub fn add_score(&mut self, name: &str, score: u32) {
        self.scores.push(ScoreEntry {
            name: sanitize_name(name),
            score,
        });
        self.scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.scores.truncate(MAX_SCORES);
        self.save();
    }

    fn save(&self) {
        if let Err(err) = fs::create_dir_all(&self.saves_dir) {
            log::error!(
                "Failed to create saves dir {}: {err}",
                self.saves_dir.display()
            );
            return;
        }

        let path = self.file_path();
        match serde_json::to_string_pretty(&self.scores) {
            Ok(json) => {
                if let Err(err) = fs::write(&path, json) {
                    log::error!("Failed to save leaderboard {}: {err}", path.display());
                }
            }
            Err(err) => {
                log::error!("Failed to serialize leaderboard: {err}");
            }
        }
    }

    pub fn scores(&self) -> &[ScoreEntry] {
        &self.scores
    }

    pub fn highest_score(&self) -> u32 {
        self.scores.first().map(|entry| entry.score).unwrap_or(0)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_saves_dir(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "snake_leaderboard_test_{}_{}_{}",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn missing_file_loads_as_empty_table() {
        let board = Leaderboard::load_from_dir(temp_saves_dir("missing"), Difficulty::Medium);
        assert!(board.scores().is_empty());
        assert_eq!(board.highest_score(), 0);
    }

    #[test]
    fn corrupt_file_loads_as_empty_table() {
        let dir = temp_saves_dir("corrupt");
        fs::create_dir_all(&dir).expect("create temp dir");
        fs::write(dir.join("leaderboard_1.json"), "not json {{{").expect("write temp file");

        let board = Leaderboard::load_from_dir(&dir, Difficulty::Medium);
        assert!(board.scores().is_empty());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn scores_round_trip_through_disk() {
        let dir = temp_saves_dir("roundtrip");
        let mut board = Leaderboard::load_from_dir(&dir, Difficulty::Hard);
        board.add_score("AAA", 42);
        board.add_score("BBB", 17);

        let reloaded = Leaderboard::load_from_dir(&dir, Difficulty::Hard);
        assert_eq!(reloaded.scores(), board.scores());
        assert_eq!(reloaded.highest_score(), 42);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn tables_are_keyed_by_difficulty() {
        let dir = temp_saves_dir("keyed");
        let mut easy = Leaderboard::load_from_dir(&dir, Difficulty::Easy);
        easy.add_score("AAA", 5);

        let hard = Leaderboard::load_from_dir(&dir, Difficulty::Hard);
        assert!(hard.scores().is_empty());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn eleven_inserts_keep_only_the_top_ten_descending() {
        let dir = temp_saves_dir("trim");
        let mut board = Leaderboard::load_from_dir(&dir, Difficulty::Medium);
        for score in [3, 25, 7, 19, 1, 42, 11, 30, 8, 16, 5] {
            board.add_score("P", score);
        }

        assert_eq!(board.scores().len(), MAX_SCORES);
        let values: Vec<u32> = board.scores().iter().map(|entry| entry.score).collect();
        assert_eq!(values, vec![42, 30, 25, 19, 16, 11, 8, 7, 5, 3]);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn is_high_score_compares_against_tenth_place_only() {
        let dir = temp_saves_dir("tenth");
        let mut board = Leaderboard::load_from_dir(&dir, Difficulty::Medium);

        // Any score qualifies while the table has room.
        board.add_score("AAA", 42);
        assert!(board.is_high_score(10));
        assert!(board.is_high_score(0));

        for score in 1..=9 {
            board.add_score("P", score * 10);
        }
        assert_eq!(board.scores().len(), MAX_SCORES);

        // 10th place is now 10; ties do not qualify.
        assert_eq!(board.scores()[9].score, 10);
        assert!(!board.is_high_score(10));
        assert!(!board.is_high_score(3));
        assert!(board.is_high_score(11));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let dir = temp_saves_dir("ties");
        let mut board = Leaderboard::load_from_dir(&dir, Difficulty::Medium);
        board.add_score("first", 7);
        board.add_score("second", 7);
        assert_eq!(board.scores()[0].name, "first");
        assert_eq!(board.scores()[1].name, "second");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn names_are_sanitized_on_insert() {
        let dir = temp_saves_dir("names");
        let mut board = Leaderboard::load_from_dir(&dir, Difficulty::Medium);
        board.add_score("  A!B@C#1 2_3 this name is far too long  ", 1);
        let name = &board.scores()[0].name;
        assert!(name.len() <= MAX_NAME_LEN);
        assert!(name.chars().all(|c| c.is_alphanumeric() || c == ' '));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn sanitize_name_filters_and_bounds() {
        assert_eq!(sanitize_name("AAA"), "AAA");
        assert_eq!(sanitize_name("a-b_c!"), "abc");
        assert_eq!(sanitize_name("  padded  "), "padded");
        assert_eq!(sanitize_name("0123456789abcdefghij").len(), MAX_NAME_LEN);
        assert_eq!(sanitize_name("!!!"), "");
    }
}
