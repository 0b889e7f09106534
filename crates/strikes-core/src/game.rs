use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::board::{BoardGrid, GivenMask, SolutionGrid};
use crate::puzzle;
use crate::validation::is_solved;

/// Wrong guesses allowed before the game is lost.
pub const MAX_MISTAKES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Solved,
    Failed,
}

/// Result of a single move. This is the only feedback channel; callers
/// re-render from the board and this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MoveOutcome {
    /// The candidate matched the solution. `solved` is set when it filled
    /// the last open cell.
    Correct { solved: bool },
    /// Wrong guess: the cell is reverted to empty and a life is spent.
    /// At zero lives the game transitions to `Failed`.
    Incorrect { lives_remaining: u32 },
    /// A non-given cell was cleared back to empty. Never costs a life.
    Cleared,
    /// Candidate or coordinates outside the accepted range. No effect.
    InvalidInput,
    /// The targeted cell is a given and cannot change.
    LockedCell,
    /// The game already ended; the move was ignored.
    GameOver,
}

/// One game: the hidden solution, the player-visible board, the given
/// mask, and the strike counter. All mutation goes through `apply_move`
/// and `clear_entries`; a new game replaces the whole value.
pub struct GameState {
    solution: SolutionGrid,
    board: BoardGrid,
    givens: GivenMask,
    mistakes: u32,
    status: GameStatus,
    started_at: Instant,
    finished_at: Option<Instant>,
}

impl GameState {
    /// Start a fresh game: generate a solution, carve the board, reset
    /// strikes. The same seed drives both generation and carving, so a
    /// seeded game is fully reproducible.
    pub fn new(seed: Option<u64>, target_givens: usize) -> Self {
        let solution = puzzle::generate_solution(seed);
        let (board, givens) = puzzle::carve(&solution, target_givens, seed);
        Self {
            solution,
            board,
            givens,
            mistakes: 0,
            status: GameStatus::InProgress,
            started_at: Instant::now(),
            finished_at: None,
        }
    }

    /// Apply one candidate value to a cell. 0 clears the cell; 1..=9 is
    /// checked against the solution; anything else is rejected.
    pub fn apply_move(&mut self, row: usize, col: usize, candidate: u8) -> MoveOutcome {
        if self.status != GameStatus::InProgress {
            return MoveOutcome::GameOver;
        }
        if row > 8 || col > 8 {
            return MoveOutcome::InvalidInput;
        }
        if candidate == 0 {
            // Given cells stay locked even against a clear.
            if self.givens[row][col] {
                return MoveOutcome::LockedCell;
            }
            self.board[row][col] = 0;
            return MoveOutcome::Cleared;
        }
        if candidate > 9 {
            return MoveOutcome::InvalidInput;
        }
        if self.givens[row][col] {
            return MoveOutcome::LockedCell;
        }

        if candidate == self.solution[row][col] {
            self.board[row][col] = candidate;
            let solved = is_solved(&self.board, &self.solution);
            if solved {
                self.status = GameStatus::Solved;
                self.finished_at = Some(Instant::now());
            }
            MoveOutcome::Correct { solved }
        } else {
            // A wrong guess is never persisted.
            self.mistakes += 1;
            self.board[row][col] = 0;
            if self.mistakes >= MAX_MISTAKES {
                self.status = GameStatus::Failed;
                self.finished_at = Some(Instant::now());
            }
            MoveOutcome::Incorrect {
                lives_remaining: self.lives_remaining(),
            }
        }
    }

    /// Reset every non-given cell to empty. Strikes and status are
    /// untouched; does nothing once the game is over.
    pub fn clear_entries(&mut self) {
        if self.status != GameStatus::InProgress {
            return;
        }
        for r in 0..9 {
            for c in 0..9 {
                if !self.givens[r][c] {
                    self.board[r][c] = 0;
                }
            }
        }
    }

    pub fn board(&self) -> &BoardGrid {
        &self.board
    }

    pub fn givens(&self) -> &GivenMask {
        &self.givens
    }

    /// The hidden solution. For trusted callers only; never serialize it
    /// toward a player.
    pub fn solution(&self) -> &SolutionGrid {
        &self.solution
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn lives_remaining(&self) -> u32 {
        MAX_MISTAKES.saturating_sub(self.mistakes)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Wall-clock time since the game started, frozen at the terminal
    /// transition.
    pub fn elapsed(&self) -> Duration {
        match self.finished_at {
            Some(end) => end.duration_since(self.started_at),
            None => self.started_at.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::filled_count;

    /// A game over a known solution with exactly the cells in `blanks`
    /// left open.
    fn game_with_blanks(blanks: &[(usize, usize)]) -> GameState {
        let solution = puzzle::generate_solution(Some(7));
        let mut board = solution;
        let mut givens = [[true; 9]; 9];
        for &(r, c) in blanks {
            board[r][c] = 0;
            givens[r][c] = false;
        }
        GameState {
            solution,
            board,
            givens,
            mistakes: 0,
            status: GameStatus::InProgress,
            started_at: Instant::now(),
            finished_at: None,
        }
    }

    /// Some value in 1..=9 that differs from `v`.
    fn wrong_value(v: u8) -> u8 {
        v % 9 + 1
    }

    #[test]
    fn new_game_respects_target_givens() {
        let game = GameState::new(Some(1), 65);
        assert_eq!(filled_count(game.board()), 65);
        assert_eq!(game.mistakes(), 0);
        assert_eq!(game.lives_remaining(), MAX_MISTAKES);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(!game.is_over());
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let a = GameState::new(Some(99), 60);
        let b = GameState::new(Some(99), 60);
        assert_eq!(a.board(), b.board());
        assert_eq!(a.givens(), b.givens());
        assert_eq!(a.solution(), b.solution());
    }

    #[test]
    fn correct_guess_on_last_blank_solves() {
        let mut game = game_with_blanks(&[(0, 0)]);
        let value = game.solution()[0][0];
        assert_eq!(
            game.apply_move(0, 0, value),
            MoveOutcome::Correct { solved: true }
        );
        assert_eq!(game.status(), GameStatus::Solved);
        assert_eq!(game.board()[0][0], value);
    }

    #[test]
    fn correct_guess_with_blanks_left_stays_in_progress() {
        let mut game = game_with_blanks(&[(0, 0), (5, 5)]);
        let value = game.solution()[0][0];
        assert_eq!(
            game.apply_move(0, 0, value),
            MoveOutcome::Correct { solved: false }
        );
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn wrong_guess_reverts_cell_and_spends_a_life() {
        let mut game = game_with_blanks(&[(0, 0)]);
        let value = wrong_value(game.solution()[0][0]);
        assert_eq!(
            game.apply_move(0, 0, value),
            MoveOutcome::Incorrect { lives_remaining: 2 }
        );
        assert_eq!(game.board()[0][0], 0);
        assert_eq!(game.mistakes(), 1);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn three_strikes_fails_the_game() {
        let blanks = [(0, 0), (4, 4), (8, 8)];
        let mut game = game_with_blanks(&blanks);
        for (i, &(r, c)) in blanks.iter().enumerate() {
            let outcome = game.apply_move(r, c, wrong_value(game.solution()[r][c]));
            assert_eq!(
                outcome,
                MoveOutcome::Incorrect {
                    lives_remaining: 2 - i as u32
                }
            );
        }
        assert_eq!(game.mistakes(), 3);
        assert_eq!(game.status(), GameStatus::Failed);

        // A fourth move is ignored entirely.
        let board_before = *game.board();
        assert_eq!(game.apply_move(0, 0, 1), MoveOutcome::GameOver);
        assert_eq!(*game.board(), board_before);
        assert_eq!(game.mistakes(), 3);
    }

    #[test]
    fn clearing_a_filled_cell_is_free() {
        let mut game = game_with_blanks(&[(0, 0), (1, 1)]);
        let value = game.solution()[0][0];
        game.apply_move(0, 0, value);
        assert_eq!(game.apply_move(0, 0, 0), MoveOutcome::Cleared);
        assert_eq!(game.board()[0][0], 0);
        assert_eq!(game.mistakes(), 0);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn given_cells_are_locked() {
        let mut game = game_with_blanks(&[(0, 0)]);
        let before = game.board()[3][3];
        assert!(game.givens()[3][3]);
        assert_eq!(game.apply_move(3, 3, 5), MoveOutcome::LockedCell);
        assert_eq!(game.apply_move(3, 3, 0), MoveOutcome::LockedCell);
        assert_eq!(game.board()[3][3], before);
        assert_eq!(game.mistakes(), 0);
    }

    #[test]
    fn out_of_range_input_is_rejected_without_side_effects() {
        let mut game = game_with_blanks(&[(0, 0)]);
        assert_eq!(game.apply_move(0, 0, 10), MoveOutcome::InvalidInput);
        assert_eq!(game.apply_move(9, 0, 5), MoveOutcome::InvalidInput);
        assert_eq!(game.apply_move(0, 9, 5), MoveOutcome::InvalidInput);
        assert_eq!(game.board()[0][0], 0);
        assert_eq!(game.mistakes(), 0);
    }

    #[test]
    fn solved_game_rejects_further_moves() {
        let mut game = game_with_blanks(&[(0, 0)]);
        game.apply_move(0, 0, game.solution()[0][0]);
        assert_eq!(game.status(), GameStatus::Solved);

        let board_before = *game.board();
        assert_eq!(game.apply_move(0, 0, 0), MoveOutcome::GameOver);
        assert_eq!(*game.board(), board_before);
    }

    #[test]
    fn clear_entries_wipes_only_user_cells() {
        let mut game = game_with_blanks(&[(0, 0), (1, 1), (2, 2)]);
        game.apply_move(0, 0, game.solution()[0][0]);
        game.apply_move(1, 1, game.solution()[1][1]);
        let givens_before = filled_count(game.board()) - 2;

        game.clear_entries();
        assert_eq!(filled_count(game.board()), givens_before);
        assert_eq!(game.board()[0][0], 0);
        assert_eq!(game.board()[1][1], 0);
        assert_eq!(game.mistakes(), 0);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn clear_entries_is_a_noop_after_game_over() {
        let mut game = game_with_blanks(&[(0, 0)]);
        game.apply_move(0, 0, game.solution()[0][0]);
        let board_before = *game.board();
        game.clear_entries();
        assert_eq!(*game.board(), board_before);
    }

    #[test]
    fn elapsed_freezes_at_game_end() {
        let mut game = game_with_blanks(&[(0, 0)]);
        game.apply_move(0, 0, game.solution()[0][0]);
        let a = game.elapsed();
        let b = game.elapsed();
        assert_eq!(a, b);
    }
}
