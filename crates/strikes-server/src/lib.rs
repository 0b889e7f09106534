pub mod routes;
pub mod state;

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// How long a finished game stays queryable.
const FINISHED_TTL: Duration = Duration::from_secs(120);
/// How long an untouched in-progress game survives.
const IDLE_TTL: Duration = Duration::from_secs(1800);

/// Build a fully configured Router + shared state. Must be called inside
/// a Tokio runtime (the cleanup task is spawned here).
pub fn build_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::default());

    {
        let state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                cleanup(&state);
            }
        });
    }

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/games", post(routes::create_game))
        .route("/games/{code}", get(routes::get_game))
        .route("/games/{code}/moves", post(routes::play_move))
        .route("/games/{code}/clear", post(routes::clear_entries))
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    (app, state)
}

/// Drop finished games after a short grace period and abandoned games
/// after half an hour of inactivity.
fn cleanup(state: &AppState) {
    let now = Instant::now();
    let mut to_remove = Vec::new();

    for entry in state.games.iter() {
        let session = entry.value();
        let idle = now.duration_since(session.last_activity);
        let ttl = if session.game.is_over() {
            FINISHED_TTL
        } else {
            IDLE_TTL
        };
        if idle > ttl {
            to_remove.push(entry.key().clone());
        }
    }

    for code in to_remove {
        state.games.remove(&code);
    }
}
