use std::time::Instant;

use dashmap::DashMap;

use strikes_core::GameState;

/// A live game plus the bookkeeping the cleanup task needs.
pub struct GameSession {
    pub game: GameState,
    pub last_activity: Instant,
}

impl GameSession {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            last_activity: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Shared application state: every live game, keyed by its code.
#[derive(Default)]
pub struct AppState {
    pub games: DashMap<String, GameSession>,
}

/// Generate a random 6-character uppercase alphanumeric game code.
pub fn generate_game_code() -> String {
    use rand::RngExt;
    let mut rng = rand::rng();
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    (0..6)
        .map(|_| {
            let idx = rng.random_range(0..CHARS.len());
            CHARS[idx] as char
        })
        .collect()
}
