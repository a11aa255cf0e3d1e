//! Scripted input sequences for deterministic simulation tests: a JSON
//! list of direction presses, each applied before one simulation step.

use serde::Deserialize;
use snake_core::session::{GameSession, StepOutcome};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub steps: Vec<ReplayStep>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayStep {
    pub dir: ReplayDir,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ReplayDir {
    Up,
    Down,
    Left,
    Right,
}

impl ReplayDir {
    pub fn velocity(self) -> (i32, i32) {
        match self {
            ReplayDir::Up => (0, -1),
            ReplayDir::Down => (0, 1),
            ReplayDir::Left => (-1, 0),
            ReplayDir::Right => (1, 0),
        }
    }
}

impl ReplaySequence {
    pub fn expanded_directions(&self) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for step in &self.steps {
            for _ in 0..step.repeat.max(1) {
                out.push(step.dir.velocity());
            }
        }
        out
    }

    /// Drive a session through the sequence, one press per step.
    pub fn run(&self, session: &mut GameSession) -> Vec<StepOutcome> {
        self.expanded_directions()
            .iter()
            .map(|&(dx, dy)| {
                session.set_direction(dx, dy);
                session.step()
            })
            .collect()
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.steps.is_empty() {
        return Err("Replay validation failed: steps list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_SIZE;
    use snake_core::difficulty::Difficulty;
    use snake_core::grid::Cell;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "snake_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    const TOUR_JSON: &str = r#"{
      "steps": [
        { "dir": "up", "repeat": 5 },
        { "dir": "right", "repeat": 8 },
        { "dir": "down", "repeat": 3 },
        { "dir": "right", "repeat": 2 },
        { "dir": "up", "repeat": 4 }
      ]
    }"#;

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(&path, r#"{ "steps": [ { "dir": "right", "repeat": 3 }, { "dir": "up" } ] }"#)
            .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_directions();
        assert_eq!(expanded.len(), 4);
        assert_eq!(expanded[0], (1, 0));
        assert_eq!(expanded[3], (0, -1));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "steps": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty steps should fail");
        assert!(err.contains("steps list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay: ReplaySequence = serde_json::from_str(TOUR_JSON).expect("parse tour");

        let mut run_a = GameSession::new(BOARD_SIZE, Difficulty::Medium);
        let mut run_b = GameSession::new(BOARD_SIZE, Difficulty::Medium);
        let outcomes_a = replay.run(&mut run_a);
        let outcomes_b = replay.run(&mut run_b);

        assert_eq!(outcomes_a, outcomes_b);
        assert_eq!(run_a.snake().segments(), run_b.snake().segments());
        assert_eq!(run_a.score(), run_b.score());
    }

    #[test]
    fn tour_ends_where_the_geometry_says_it_must() {
        let replay: ReplaySequence = serde_json::from_str(TOUR_JSON).expect("parse tour");
        let mut session = GameSession::new(BOARD_SIZE, Difficulty::Medium);
        let outcomes = replay.run(&mut session);

        // The path stays on the board and off the apple cell (15, 10).
        assert!(outcomes
            .iter()
            .all(|outcome| *outcome == StepOutcome::Moved));
        assert_eq!(session.snake().head(), Cell::new(15, 4));
        assert_eq!(session.snake().len(), 3);
        assert_eq!(session.score(), 0);

        // Length invariance also means contiguity held the whole way.
        for pair in session.snake().segments().windows(2) {
            let manhattan = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(manhattan, 1);
        }
    }
}
