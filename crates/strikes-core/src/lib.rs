pub mod board;
pub mod game;
pub mod protocol;
pub mod puzzle;
pub mod validation;

pub use board::{BoardGrid, GivenMask, SolutionGrid};
pub use game::{GameState, GameStatus, MoveOutcome, MAX_MISTAKES};
pub use protocol::{GameSnapshot, MoveRequest, MoveResponse, NewGameRequest};
