//! Brick Chess Engine
//!
//! Iterative-deepening alpha-beta search with a tapered PeSTO evaluation.
//! Deliberately plain: no transposition table, no quiescence, no move
//! ordering below the root.

mod driver;
mod eval;
mod evaluation;
mod search;
mod tree;

#[cfg(test)]
mod test_tree;

use std::time::Instant;

use chess_core::{compute_budget, GoParams, Move, Position, StopFlag, TimePolicy};
use tracing::debug;

/// Brick engine: owns the time policy, builds a fresh search per request.
#[derive(Debug, Clone, Default)]
pub struct BrickEngine {
    policy: TimePolicy,
}

impl BrickEngine {
    pub fn new(policy: TimePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &TimePolicy {
        &self.policy
    }

    pub fn name(&self) -> &str {
        "Brick"
    }

    pub fn author(&self) -> &str {
        "Brick developers"
    }

    /// Nothing carries over between searches, so there is nothing to reset.
    pub fn new_game(&mut self) {}

    /// Searches `pos` for the side to move under the limits in `go`.
    ///
    /// `stop` ends the search early; `on_event` receives progress as it
    /// happens. The caller's position is not touched.
    pub fn think<F>(
        &mut self,
        pos: &Position,
        go: &GoParams,
        stop: StopFlag,
        on_event: F,
    ) -> SearchResult
    where
        F: FnMut(SearchEvent<Move>),
    {
        let perspective = pos.side_to_move();
        let mut root = pos.clone();
        let root_moves = root.legal_moves().len();

        let budget = compute_budget(
            Instant::now(),
            &go.clock_for(perspective),
            root_moves,
            &self.policy,
            stop,
        );
        debug!(
            root_moves,
            allotted_ms = budget.allotted().map(|a| a.as_millis() as u64),
            max_depth = go.depth,
            "starting search"
        );

        find_best_move(&mut root, perspective, &budget, go.depth, on_event)
    }
}

/// Result of [`BrickEngine::think`] on a real board.
pub type SearchResult<M = Move> = driver::SearchResult<M>;

pub use driver::{find_best_move, DepthReport, RootEntry, SearchEvent, MAX_DEPTH};
pub use eval::{evaluate, tapered_score};
pub use evaluation::{Evaluation, Sign};
pub use search::{search, SearchContext, SearchStats};
pub use tree::{Applied, SearchTree};
