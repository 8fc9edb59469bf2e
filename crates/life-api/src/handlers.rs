//! REST API endpoint handlers for the board service.
//!
//! Handlers are generic over the board store so the same router serves
//! the in-memory and `PostgreSQL` backends.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/boards` | Upload a new board |
//! | `GET` | `/api/boards/{id}` | Current stored board |
//! | `GET` | `/api/boards/{id}/next` | Advance one generation (persisted) |
//! | `GET` | `/api/boards/{id}/steps/{count}` | State `count` generations ahead |
//! | `GET` | `/api/boards/{id}/final` | Final state, default budget |
//! | `GET` | `/api/boards/{id}/final/{max_generations}` | Final state, explicit budget |
//! | `GET` | `/health` | Liveness probe |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use life_core::{BoardRepository, Grid, SimulationError};
use life_types::{BoardId, BoardStateRequest, BoardView, CreateBoardResponse, JaggedState};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/boards
// ---------------------------------------------------------------------------

/// Store a new board and return its identifier.
///
/// The `state` array must be non-empty, its first row non-empty, and all
/// rows the same length.
pub async fn create_board<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<BoardStateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateBoardResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let grid = validate_state(request.state)?;

    let id = state.service.create_board(grid).await?;
    Ok((StatusCode::CREATED, Json(CreateBoardResponse { id })))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{id}
// ---------------------------------------------------------------------------

/// Return the board as currently stored.
pub async fn get_board<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<BoardView>, ApiError> {
    let board = state.service.get_board(parse_board_id(&id)?).await?;
    Ok(Json(board.to_view()))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{id}/next
// ---------------------------------------------------------------------------

/// Advance the board one generation and return the new state.
pub async fn next_state<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<JaggedState>, ApiError> {
    let next = state.service.next_state(parse_board_id(&id)?).await?;
    Ok(Json(next.to_rows()))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{id}/steps/{count}
// ---------------------------------------------------------------------------

/// Return the state `count` generations ahead without storing it.
pub async fn state_after_steps<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((id, count)): Path<(String, String)>,
) -> Result<Json<JaggedState>, ApiError> {
    let id = parse_board_id(&id)?;
    let steps = parse_integer("step count", &count)?;

    let grid = state.service.state_after_steps(id, steps).await?;
    Ok(Json(grid.to_rows()))
}

// ---------------------------------------------------------------------------
// GET /api/boards/{id}/final[/{max_generations}]
// ---------------------------------------------------------------------------

/// Return the final stable state using the configured default budget.
pub async fn final_state<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<JaggedState>, ApiError> {
    let id = parse_board_id(&id)?;
    let budget = state.service.default_max_generations();

    let grid = state.service.final_state(id, budget).await?;
    Ok(Json(grid.to_rows()))
}

/// Return the final stable state within an explicit generation budget.
pub async fn final_state_within<R: BoardRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path((id, max_generations)): Path<(String, String)>,
) -> Result<Json<JaggedState>, ApiError> {
    let id = parse_board_id(&id)?;
    let requested = parse_integer("max_generations", &max_generations)?;
    let Ok(budget) = u64::try_from(requested) else {
        return Err(SimulationError::InvalidArgument(format!(
            "max_generations cannot be negative (got {requested})"
        ))
        .into());
    };

    let grid = state.service.final_state(id, budget).await?;
    Ok(Json(grid.to_rows()))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_board_id(raw: &str) -> Result<BoardId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::InvalidInput(format!("invalid board id {raw:?}: {e}")))
}

fn parse_integer(name: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::InvalidInput(format!("invalid {name} {raw:?}: {e}")))
}

/// Check the uploaded rows and build a grid from them.
fn validate_state(rows: JaggedState) -> Result<Grid, ApiError> {
    match rows.first() {
        None => Err(ApiError::InvalidInput(String::from("state must not be empty"))),
        Some(first) if first.is_empty() => Err(ApiError::InvalidInput(String::from(
            "state rows must not be empty",
        ))),
        Some(_) => Ok(Grid::from_rows(rows)?),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_rectangular_rows() {
        let grid = validate_state(vec![vec![true, false], vec![false, false]]).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
    }

    #[test]
    fn validate_rejects_empty_and_ragged_input() {
        assert!(validate_state(Vec::new()).is_err());
        assert!(validate_state(vec![Vec::new()]).is_err());
        assert!(validate_state(vec![vec![true, true], vec![true]]).is_err());
    }

    #[test]
    fn parse_integer_accepts_negative_values() {
        assert_eq!(parse_integer("step count", "-3").unwrap(), -3);
        assert!(parse_integer("step count", "three").is_err());
    }
}
