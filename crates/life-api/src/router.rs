//! Axum router construction for the board API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use life_core::BoardRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the board API.
///
/// The router includes:
/// - `GET /health` -- liveness probe
/// - `POST /api/boards` -- upload a board
/// - `GET /api/boards/{id}` -- stored board
/// - `GET /api/boards/{id}/next` -- advance one generation
/// - `GET /api/boards/{id}/steps/{count}` -- look ahead `count` generations
/// - `GET /api/boards/{id}/final` -- final state, default budget
/// - `GET /api/boards/{id}/final/{max_generations}` -- final state, explicit budget
///
/// CORS is configured to allow any origin.
pub fn build_router<R: BoardRepository + 'static>(state: Arc<AppState<R>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/boards", post(handlers::create_board::<R>))
        .route("/api/boards/{id}", get(handlers::get_board::<R>))
        .route("/api/boards/{id}/next", get(handlers::next_state::<R>))
        .route(
            "/api/boards/{id}/steps/{count}",
            get(handlers::state_after_steps::<R>),
        )
        .route("/api/boards/{id}/final", get(handlers::final_state::<R>))
        .route(
            "/api/boards/{id}/final/{max_generations}",
            get(handlers::final_state_within::<R>),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
