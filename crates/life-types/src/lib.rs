//! Shared type definitions for the Game of Life board service.
//!
//! Types defined here are used by the engine, the store and the HTTP API,
//! and flow downstream to `TypeScript` via `ts-rs` for browser clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for board identifiers
//! - [`structs`] -- Request and response bodies of the board API

pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::BoardId;
pub use structs::{BoardStateRequest, BoardView, CreateBoardResponse, JaggedState};
