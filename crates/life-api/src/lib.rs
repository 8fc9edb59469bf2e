//! HTTP API for the Game of Life board service.
//!
//! This crate provides an Axum server exposing the board operations of
//! [`life_core::GameService`] as JSON endpoints under `/api/boards`,
//! plus a `/health` probe. The router is generic over the board store,
//! so it runs unchanged on the in-memory and `PostgreSQL` backends.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
