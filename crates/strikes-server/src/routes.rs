use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use strikes_core::{GameSnapshot, GameState, MoveRequest, MoveResponse, NewGameRequest};

use crate::state::{generate_game_code, AppState, GameSession};

// ── Health ──────────────────────────────────────────────────────────────

pub async fn health() -> &'static str {
    "ok"
}

// ── Games ───────────────────────────────────────────────────────────────

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewGameRequest>,
) -> Json<GameSnapshot> {
    let game = GameState::new(req.seed, req.target_givens);

    // Codes collide rarely; retry until a free one turns up.
    let mut code = generate_game_code();
    while state.games.contains_key(&code) {
        code = generate_game_code();
    }

    let snapshot = GameSnapshot::of(&code, &game);
    state.games.insert(code, GameSession::new(game));

    Json(snapshot)
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<GameSnapshot>, StatusCode> {
    let session = state.games.get(&code).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(GameSnapshot::of(&code, &session.game)))
}

pub async fn play_move(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, StatusCode> {
    let mut session = state.games.get_mut(&code).ok_or(StatusCode::NOT_FOUND)?;

    let outcome = session.game.apply_move(req.row, req.col, req.value);
    session.touch();

    Ok(Json(MoveResponse {
        outcome,
        game: GameSnapshot::of(&code, &session.game),
    }))
}

pub async fn clear_entries(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<GameSnapshot>, StatusCode> {
    let mut session = state.games.get_mut(&code).ok_or(StatusCode::NOT_FOUND)?;

    session.game.clear_entries();
    session.touch();

    Ok(Json(GameSnapshot::of(&code, &session.game)))
}
