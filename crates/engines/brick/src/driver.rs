//! Iterative deepening over the root moves.
//!
//! Each pass searches every root move one ply deeper than the last, then
//! re-sorts the root list so the next pass looks at the strongest moves
//! first. Only completed passes are trusted; a pass cut short by the
//! budget is thrown away, except the very first one.

use std::time::Duration;

use chess_core::{Budget, Color};
use tracing::debug;

use crate::evaluation::Evaluation;
use crate::search::{search, SearchContext};
use crate::tree::{Applied, SearchTree};

/// Hard ceiling on iterative deepening, reached only on trivial trees.
pub const MAX_DEPTH: u32 = 64;

/// One legal root move and its score at the last depth that reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootEntry<M> {
    pub mv: M,
    pub evaluation: Evaluation,
}

/// Summary of one completed depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthReport<M> {
    pub depth: u32,
    pub nodes: u64,
    pub nps: u64,
    pub evaluation: Evaluation,
    pub best_move: M,
    pub elapsed: Duration,
}

/// Progress emitted while the driver runs. Observability only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchEvent<M> {
    /// A root move is about to be searched; `number` is 1-based.
    CurrentMove { depth: u32, mv: M, number: usize },
    DepthCompleted(DepthReport<M>),
}

/// Outcome of one search request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<M> {
    /// `None` only when the root has no legal move
    pub best_move: Option<M>,
    pub evaluation: Evaluation,
    /// Deepest completed depth, 0 if nothing was searched
    pub depth: u32,
    pub nodes: u64,
    pub nps: u64,
    pub elapsed: Duration,
    /// A forced mate ended the search before the budget did
    pub mate_found: bool,
}

fn nodes_per_second(nodes: u64, budget: &Budget) -> u64 {
    (nodes as u128 * 1_000_000_000 / budget.elapsed_nanos()) as u64
}

fn report<M: Copy>(
    ctx: &SearchContext<'_>,
    depth: u32,
    best: &RootEntry<M>,
) -> DepthReport<M> {
    DepthReport {
        depth,
        nodes: ctx.stats.nodes,
        nps: nodes_per_second(ctx.stats.nodes, ctx.budget),
        evaluation: best.evaluation,
        best_move: best.mv,
        elapsed: ctx.budget.elapsed(),
    }
}

/// Shortest mate the engine can have proven after searching `depth` plies.
fn shortest_mate(depth: u32) -> Evaluation {
    Evaluation::MateIn(((depth + 1) / 2) as i32)
}

/// Finds the best move for `perspective`, the side to move in `tree`.
///
/// Always returns a move when one exists, even if `budget` is already
/// exhausted: the first depth runs over every root move regardless.
/// `max_depth` limits the deepest pass on top of [`MAX_DEPTH`].
pub fn find_best_move<T, F>(
    tree: &mut T,
    perspective: Color,
    budget: &Budget,
    max_depth: Option<u32>,
    mut on_event: F,
) -> SearchResult<T::Move>
where
    T: SearchTree,
    F: FnMut(SearchEvent<T::Move>),
{
    let mut ctx = SearchContext::new(budget, perspective);

    let moves = tree.legal_moves();
    if moves.is_empty() {
        return SearchResult {
            best_move: None,
            evaluation: tree.evaluate(perspective),
            depth: 0,
            nodes: 0,
            nps: 0,
            elapsed: budget.elapsed(),
            mate_found: false,
        };
    }

    let mut entries: Vec<RootEntry<T::Move>> = moves
        .into_iter()
        .map(|mv| RootEntry {
            mv,
            evaluation: Evaluation::DRAW,
        })
        .collect();
    let mut best = entries[0];
    let mut completed = 0;
    let depth_limit = max_depth.map_or(MAX_DEPTH, |d| d.clamp(1, MAX_DEPTH));

    for depth in 1..=depth_limit {
        if depth > 1 && budget.is_exhausted() {
            break;
        }

        let mut alpha = Evaluation::NEG_INFINITY;
        let beta = Evaluation::INFINITY;
        let mut interrupted = false;

        for (index, entry) in entries.iter_mut().enumerate() {
            if depth > 1 && budget.is_exhausted() {
                interrupted = true;
                break;
            }
            on_event(SearchEvent::CurrentMove {
                depth,
                mv: entry.mv,
                number: index + 1,
            });

            entry.evaluation = {
                let mut child = Applied::new(tree, entry.mv);
                search(&mut *child, &mut ctx, false, depth - 1, alpha, beta)
            };

            if entry.evaluation >= shortest_mate(depth) {
                ctx.stats.nodes += 1;
                let found = *entry;
                debug!(depth, nodes = ctx.stats.nodes, "forced mate found at root");
                on_event(SearchEvent::DepthCompleted(report(&ctx, depth, &found)));
                return SearchResult {
                    best_move: Some(found.mv),
                    evaluation: found.evaluation,
                    depth,
                    nodes: ctx.stats.nodes,
                    nps: nodes_per_second(ctx.stats.nodes, budget),
                    elapsed: budget.elapsed(),
                    mate_found: true,
                };
            }

            alpha = alpha.max(entry.evaluation);
            if beta <= alpha {
                break;
            }
        }

        // Children cut short by the deadline came back with static scores
        if depth > 1 && (interrupted || budget.is_exhausted()) {
            debug!(depth, "depth abandoned, budget exhausted");
            break;
        }

        entries.sort_by(|a, b| b.evaluation.cmp(&a.evaluation));
        best = entries[0];
        completed = depth;
        debug!(
            depth,
            nodes = ctx.stats.nodes,
            evaluation = %best.evaluation,
            "depth completed"
        );
        on_event(SearchEvent::DepthCompleted(report(&ctx, depth, &best)));
    }

    ctx.stats.nodes += 1;
    SearchResult {
        best_move: Some(best.mv),
        evaluation: best.evaluation,
        depth: completed,
        nodes: ctx.stats.nodes,
        nps: nodes_per_second(ctx.stats.nodes, budget),
        elapsed: budget.elapsed(),
        mate_found: false,
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
