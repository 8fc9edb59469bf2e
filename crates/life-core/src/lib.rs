//! Simulation engine and board service for Conway's Game of Life.
//!
//! The engine runs B3/S23 on a growable grid: whenever a live cell
//! touches the border, the grid gains a dead ring before the next
//! generation is computed. On top of it, [`GameService`] loads boards
//! from a [`BoardRepository`], runs engine operations and stores
//! transitions.
//!
//! # Modules
//!
//! - [`grid`] -- Immutable rectangular cell matrix with border checks and
//!   expansion.
//! - [`engine`] -- `next_generation`, `advance` and `find_final_state`, plus
//!   variants bounded by a cell limit.
//! - [`board`] -- Board entity (grid plus identity).
//! - [`repository`] -- [`BoardRepository`] trait and in-memory store.
//! - [`service`] -- [`GameService`] operations over stored boards.
//! - [`config`] -- Configuration loading from `life-config.yaml`.
//! - [`error`] -- Engine and service error types.
//!
//! [`GameService`]: service::GameService
//! [`BoardRepository`]: repository::BoardRepository

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod repository;
pub mod service;

pub use board::Board;
pub use error::{ServiceError, SimulationError};
pub use grid::{Grid, GridError};
pub use repository::{BoardRepository, InMemoryBoardRepository, RepositoryError};
pub use service::GameService;
