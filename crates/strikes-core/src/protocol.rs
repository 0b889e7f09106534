use serde::{Deserialize, Serialize};

use crate::game::{GameState, GameStatus, MoveOutcome};

/// Default reveal count for an easy board.
fn default_target_givens() -> usize {
    65
}

/// Request body for creating a game. Omitting the seed gives a random
/// game; omitting `target_givens` falls back to an easy 65.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub seed: Option<u64>,
    #[serde(default = "default_target_givens")]
    pub target_givens: usize,
}

/// Everything a client is allowed to see about a game. The solution
/// never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub code: String,
    /// Row-major grid, 0 for empty.
    pub board: Vec<Vec<u8>>,
    pub givens: Vec<Vec<bool>>,
    pub mistakes: u32,
    pub lives_remaining: u32,
    pub status: GameStatus,
    pub elapsed_secs: u64,
}

impl GameSnapshot {
    pub fn of(code: &str, game: &GameState) -> Self {
        Self {
            code: code.to_string(),
            board: game.board().iter().map(|row| row.to_vec()).collect(),
            givens: game.givens().iter().map(|row| row.to_vec()).collect(),
            mistakes: game.mistakes(),
            lives_remaining: game.lives_remaining(),
            status: game.status(),
            elapsed_secs: game.elapsed().as_secs(),
        }
    }
}

/// One move against a game. `value` 1..=9 places a digit, 0 clears the
/// cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    pub row: usize,
    pub col: usize,
    pub value: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    pub outcome: MoveOutcome,
    pub game: GameSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_hides_the_solution() {
        let game = GameState::new(Some(5), 60);
        let snapshot = GameSnapshot::of("ABC123", &game);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"board\""));
        assert!(!json.contains("solution"));

        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, "ABC123");
        assert_eq!(back.board, snapshot.board);
        assert_eq!(back.lives_remaining, 3);
    }

    #[test]
    fn outcomes_serialize_tagged() {
        let json =
            serde_json::to_string(&MoveOutcome::Incorrect { lives_remaining: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"Incorrect","lives_remaining":2}"#);

        let json = serde_json::to_string(&MoveOutcome::LockedCell).unwrap();
        assert_eq!(json, r#"{"type":"LockedCell"}"#);
    }

    #[test]
    fn new_game_request_defaults_apply() {
        let req: NewGameRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.seed, None);
        assert_eq!(req.target_givens, 65);

        let req: NewGameRequest =
            serde_json::from_str(r#"{"seed": 42, "target_givens": 50}"#).unwrap();
        assert_eq!(req.seed, Some(42));
        assert_eq!(req.target_givens, 50);
    }
}
