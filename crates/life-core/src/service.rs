//! Board service: runs engine operations against stored boards.
//!
//! | Operation | Persists result |
//! |-----------|-----------------|
//! | [`GameService::create_board`] | yes (new board) |
//! | [`GameService::next_state`] | yes (board advances one generation) |
//! | [`GameService::state_after_steps`] | no |
//! | [`GameService::final_state`] | no |
//!
//! Argument checks run before the store is touched. Engine work runs on
//! Tokio's blocking pool, and every grid is capped at
//! [`SimulationConfig::max_cells`] so a growing pattern cannot hold a
//! worker indefinitely.

use std::sync::Arc;

use life_types::BoardId;
use tracing::{debug, info};

use crate::board::Board;
use crate::config::SimulationConfig;
use crate::engine;
use crate::error::{ServiceError, SimulationError};
use crate::grid::Grid;
use crate::repository::BoardRepository;

/// Board operations backed by a [`BoardRepository`].
pub struct GameService<R> {
    repository: Arc<R>,
    limits: SimulationConfig,
}

impl<R: BoardRepository> GameService<R> {
    /// Create a service over the given store.
    pub const fn new(repository: Arc<R>, limits: SimulationConfig) -> Self {
        Self { repository, limits }
    }

    /// Generation budget used when a caller does not supply one.
    pub const fn default_max_generations(&self) -> u64 {
        self.limits.default_max_generations
    }

    /// Persist a new board and return its identifier.
    ///
    /// # Errors
    ///
    /// Fails with [`SimulationError::GridTooLarge`] if the grid is over
    /// the configured `max_cells`.
    pub async fn create_board(&self, grid: Grid) -> Result<BoardId, ServiceError> {
        engine::ensure_within(&grid, self.limits.max_cells)?;
        let board = Board::new(grid);
        self.repository.save_board(&board).await?;

        info!(
            board_id = %board.id,
            width = board.grid.width(),
            height = board.grid.height(),
            live_cells = board.grid.live_count(),
            "Board created"
        );
        Ok(board.id)
    }

    /// Load a board as currently stored.
    pub async fn get_board(&self, id: BoardId) -> Result<Board, ServiceError> {
        Ok(self.repository.get_board(id).await?)
    }

    /// Advance a board by one generation and store the result.
    pub async fn next_state(&self, id: BoardId) -> Result<Grid, ServiceError> {
        let mut board = self.repository.get_board(id).await?;
        let max_cells = self.limits.max_cells;
        let current = std::mem::take(&mut board.grid);
        let next =
            run_engine(move || engine::next_generation_within(&current, max_cells)).await?;
        board.grid = next.clone();
        self.repository.save_board(&board).await?;

        info!(
            board_id = %id,
            width = next.width(),
            height = next.height(),
            live_cells = next.live_count(),
            "Board advanced one generation"
        );
        Ok(next)
    }

    /// Compute the state `steps` generations ahead without storing it.
    ///
    /// # Errors
    ///
    /// Fails with [`SimulationError::InvalidArgument`] for a negative
    /// count or one above the configured `max_steps`, before loading, and
    /// with [`SimulationError::GridTooLarge`] if the pattern outgrows
    /// `max_cells`.
    pub async fn state_after_steps(&self, id: BoardId, steps: i64) -> Result<Grid, ServiceError> {
        let count = engine::step_count(steps)?;
        self.check_limit("steps", count)?;

        let board = self.repository.get_board(id).await?;
        let max_cells = self.limits.max_cells;
        let state =
            run_engine(move || engine::advance_within(&board.grid, steps, max_cells)).await?;

        debug!(board_id = %id, steps = count, "Computed state after steps");
        Ok(state)
    }

    /// Search for the board's still-life final state without storing it.
    ///
    /// # Errors
    ///
    /// Fails with [`SimulationError::InvalidArgument`] if the budget is
    /// above the configured `max_steps`, with the engine's
    /// [`SimulationError::Oscillation`] / [`SimulationError::NoConvergence`],
    /// or with [`SimulationError::GridTooLarge`] past `max_cells`.
    pub async fn final_state(&self, id: BoardId, max_generations: u64) -> Result<Grid, ServiceError> {
        self.check_limit("max_generations", max_generations)?;

        let board = self.repository.get_board(id).await?;
        let max_cells = self.limits.max_cells;
        let result = run_engine(move || {
            engine::find_final_state_within(&board.grid, max_generations, max_cells)
        })
        .await;

        match &result {
            Ok(state) => debug!(board_id = %id, live_cells = state.live_count(), "Final state found"),
            Err(e) => debug!(board_id = %id, error = %e, "No final state"),
        }
        result
    }

    fn check_limit(&self, name: &str, requested: u64) -> Result<(), SimulationError> {
        if requested > self.limits.max_steps {
            return Err(SimulationError::InvalidArgument(format!(
                "{name} must be at most {} (got {requested})",
                self.limits.max_steps
            )));
        }
        Ok(())
    }
}

/// Run an engine computation on the blocking thread pool.
async fn run_engine<T, F>(compute: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, SimulationError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(compute).await??)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryBoardRepository, RepositoryError};

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.chars().map(|c| c == '#').collect())
                .collect(),
        )
        .unwrap()
    }

    fn service() -> GameService<InMemoryBoardRepository> {
        GameService::new(
            Arc::new(InMemoryBoardRepository::new()),
            SimulationConfig::default(),
        )
    }

    fn blinker() -> Grid {
        grid(&[".#.", ".#.", ".#."])
    }

    #[tokio::test]
    async fn create_then_get() {
        let svc = service();
        let id = svc.create_board(blinker()).await.unwrap();
        let board = svc.get_board(id).await.unwrap();
        assert_eq!(board.id, id);
        assert_eq!(board.grid, blinker());
    }

    #[tokio::test]
    async fn unknown_board_is_not_found() {
        let svc = service();
        let id = BoardId::new();
        let err = svc.next_state(id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::NotFound(missing)) if missing == id
        ));
        assert!(svc.state_after_steps(id, 1).await.is_err());
        assert!(svc.final_state(id, 10).await.is_err());
    }

    #[tokio::test]
    async fn next_state_persists_each_generation() {
        let svc = service();
        let id = svc.create_board(blinker()).await.unwrap();

        let horizontal = grid(&[".....", ".....", ".###.", ".....", "....."]);
        let vertical = grid(&[".....", "..#..", "..#..", "..#..", "....."]);

        assert_eq!(svc.next_state(id).await.unwrap(), horizontal);
        assert_eq!(svc.next_state(id).await.unwrap(), vertical);
        assert_eq!(svc.next_state(id).await.unwrap(), horizontal);
        assert_eq!(svc.get_board(id).await.unwrap().grid, horizontal);
    }

    #[tokio::test]
    async fn state_after_steps_does_not_persist() {
        let svc = service();
        let id = svc.create_board(blinker()).await.unwrap();

        let after = svc.state_after_steps(id, 3).await.unwrap();
        assert_eq!(after.width(), 5);
        assert_eq!(svc.get_board(id).await.unwrap().grid, blinker());
    }

    #[tokio::test]
    async fn zero_steps_returns_stored_state() {
        let svc = service();
        let id = svc.create_board(blinker()).await.unwrap();
        assert_eq!(svc.state_after_steps(id, 0).await.unwrap(), blinker());
    }

    #[tokio::test]
    async fn negative_steps_fail_before_loading() {
        // The board does not exist: a NotFound here would mean the store
        // was consulted first.
        let svc = service();
        let err = svc.state_after_steps(BoardId::new(), -1).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Simulation(SimulationError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn step_limit_is_enforced() {
        let svc = GameService::new(
            Arc::new(InMemoryBoardRepository::new()),
            SimulationConfig {
                default_max_generations: 10,
                max_steps: 5,
                ..SimulationConfig::default()
            },
        );
        let id = svc.create_board(blinker()).await.unwrap();
        assert!(svc.state_after_steps(id, 5).await.is_ok());
        assert!(matches!(
            svc.state_after_steps(id, 6).await.unwrap_err(),
            ServiceError::Simulation(SimulationError::InvalidArgument(_))
        ));
        assert!(matches!(
            svc.final_state(id, 6).await.unwrap_err(),
            ServiceError::Simulation(SimulationError::InvalidArgument(_))
        ));
    }

    fn service_with_max_cells(max_cells: usize) -> GameService<InMemoryBoardRepository> {
        GameService::new(
            Arc::new(InMemoryBoardRepository::new()),
            SimulationConfig {
                max_cells,
                ..SimulationConfig::default()
            },
        )
    }

    fn glider() -> Grid {
        grid(&[
            "......", "..#...", "...#..", ".###..", "......", "......",
        ])
    }

    #[tokio::test]
    async fn growing_pattern_is_stopped_at_cell_limit() {
        // The full step and generation limits are allowed, but the glider
        // outgrows a 20x20 grid long before either is spent.
        let svc = service_with_max_cells(400);
        let id = svc.create_board(glider()).await.unwrap();
        let max_steps = i64::try_from(svc.limits.max_steps).unwrap();

        let err = svc.state_after_steps(id, max_steps).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Simulation(SimulationError::GridTooLarge {
                width: 22,
                height: 22,
                max_cells: 400
            })
        ));

        let err = svc.final_state(id, svc.limits.max_steps).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Simulation(SimulationError::GridTooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn next_state_refuses_to_grow_past_limit_and_keeps_board() {
        // 3x3 blinker needs a 5x5 grid for its next generation.
        let svc = service_with_max_cells(24);
        let id = svc.create_board(blinker()).await.unwrap();
        assert!(matches!(
            svc.next_state(id).await.unwrap_err(),
            ServiceError::Simulation(SimulationError::GridTooLarge { .. })
        ));
        assert_eq!(svc.get_board(id).await.unwrap().grid, blinker());
    }

    #[tokio::test]
    async fn oversized_board_is_not_created() {
        let svc = service_with_max_cells(8);
        assert!(matches!(
            svc.create_board(blinker()).await.unwrap_err(),
            ServiceError::Simulation(SimulationError::GridTooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn final_state_of_tromino_is_block() {
        let svc = service();
        let id = svc
            .create_board(grid(&["....", ".##.", ".#..", "...."]))
            .await
            .unwrap();
        let result = svc.final_state(id, 10).await.unwrap();
        assert_eq!(result, grid(&["....", ".##.", ".##.", "...."]));
        // Stored board is untouched.
        assert_eq!(svc.get_board(id).await.unwrap().grid.live_count(), 3);
    }

    #[tokio::test]
    async fn final_state_reports_oscillation() {
        let svc = service();
        let id = svc.create_board(blinker()).await.unwrap();
        let err = svc.final_state(id, 10).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Simulation(SimulationError::Oscillation { period: 2 })
        ));
    }

    #[tokio::test]
    async fn final_state_with_tiny_budget_does_not_converge() {
        let svc = service();
        let id = svc.create_board(blinker()).await.unwrap();
        let err = svc.final_state(id, 1).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Simulation(SimulationError::NoConvergence { max_generations: 1 })
        ));
    }
}
