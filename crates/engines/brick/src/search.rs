//! Depth-limited alpha-beta search.
//!
//! The engine is always the maximizing side, whatever its colour. Mate
//! distances are kept in whole moves relative to the node being searched:
//! a mate suffered by the engine moves one further away each time it is
//! passed up through an engine (maximizing) node, a mate delivered by the
//! engine each time it is passed up through an opponent node.

use chess_core::{Budget, Color};

use crate::evaluation::Evaluation;
use crate::tree::{Applied, SearchTree};

/// Per-request counters. Telemetry only; nothing in the search reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
}

/// State shared by every node of one root search.
#[derive(Debug)]
pub struct SearchContext<'a> {
    pub budget: &'a Budget,
    /// Colour the engine is playing
    pub perspective: Color,
    pub stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new(budget: &'a Budget, perspective: Color) -> Self {
        Self {
            budget,
            perspective,
            stats: SearchStats::default(),
        }
    }

    fn leaf<T: SearchTree>(&mut self, tree: &T) -> Evaluation {
        self.stats.nodes += 1;
        tree.evaluate(self.perspective)
    }
}

/// Searches the current node of `tree` to `depth` plies.
///
/// Returns the node's score for the engine. With the full window
/// (`NEG_INFINITY`, `INFINITY`) the score is exact; otherwise a score at or
/// beyond a bound only says the true score lies beyond it too.
///
/// The tree is left exactly as found.
pub fn search<T: SearchTree>(
    tree: &mut T,
    ctx: &mut SearchContext<'_>,
    maximizing: bool,
    depth: u32,
    mut alpha: Evaluation,
    mut beta: Evaluation,
) -> Evaluation {
    if depth == 0 || ctx.budget.is_exhausted() {
        return ctx.leaf(tree);
    }
    let moves = tree.legal_moves();
    if moves.is_empty() {
        return ctx.leaf(tree);
    }

    if maximizing {
        let mut best = Evaluation::NEG_INFINITY;
        for mv in moves {
            let result = {
                let mut child = Applied::new(tree, mv);
                search(&mut *child, ctx, false, depth - 1, alpha, beta)
            };
            // Nothing beats mating on the spot
            if result == Evaluation::MateIn(1) {
                ctx.stats.nodes += 1;
                return result;
            }
            best = best.max(result);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        ctx.stats.nodes += 1;
        best.extend_loss()
    } else {
        let mut best = Evaluation::INFINITY;
        for mv in moves {
            let result = {
                let mut child = Applied::new(tree, mv);
                search(&mut *child, ctx, true, depth - 1, alpha, beta)
            };
            // The opponent cannot do better than mating on the spot
            if result == Evaluation::MateIn(-1) {
                ctx.stats.nodes += 1;
                return result;
            }
            best = best.min(result);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        ctx.stats.nodes += 1;
        best.extend_win()
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
