//! `PostgreSQL` persistence for the Game of Life board service.
//!
//! Boards are stored one row per board in the `boards` table, with the
//! grid written as a row-major `0`/`1` string alongside its dimensions.
//! [`BoardStore`] implements [`life_core::BoardRepository`], so the
//! service layer can swap it in for the in-memory store.
//!
//! # Modules
//!
//! - [`postgres`] -- connection pool, configuration, and migrations
//! - [`board_store`] -- board upsert and lookup
//! - [`cells`] -- cell string encoding
//! - [`error`] -- shared error types

pub mod board_store;
pub mod cells;
pub mod error;
pub mod postgres;

pub use board_store::{BoardRow, BoardStore};
pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
