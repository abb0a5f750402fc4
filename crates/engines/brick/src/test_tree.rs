//! Synthetic game trees standing in for the rules authority in tests.

use std::cell::Cell;

use chess_core::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::evaluation::Evaluation;
use crate::tree::SearchTree;

#[derive(Debug, Clone)]
pub struct Node {
    /// Static score, used when the search stops at this node
    pub value: Evaluation,
    pub children: Vec<Node>,
}

pub fn leaf(value: Evaluation) -> Node {
    Node {
        value,
        children: Vec::new(),
    }
}

pub fn cp(v: i32) -> Node {
    leaf(Evaluation::Centipawn(v))
}

pub fn branch(children: Vec<Node>) -> Node {
    Node {
        value: Evaluation::DRAW,
        children,
    }
}

/// Full tree of the given depth and width with random centipawn scores.
pub fn random_tree(rng: &mut StdRng, depth: u32, width: usize) -> Node {
    if depth == 0 {
        return cp(rng.gen_range(-500..=500));
    }
    let width = rng.gen_range(1..=width);
    Node {
        value: Evaluation::Centipawn(rng.gen_range(-500..=500)),
        children: (0..width)
            .map(|_| random_tree(rng, depth - 1, width.max(2)))
            .collect(),
    }
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Reference minimax: no pruning, no short-circuits, same mate bookkeeping.
pub fn minimax(node: &Node, maximizing: bool, depth: u32) -> Evaluation {
    if depth == 0 || node.children.is_empty() {
        return node.value;
    }
    let results = node
        .children
        .iter()
        .map(|child| minimax(child, !maximizing, depth - 1));
    if maximizing {
        results
            .max()
            .unwrap_or(Evaluation::NEG_INFINITY)
            .extend_loss()
    } else {
        results.min().unwrap_or(Evaluation::INFINITY).extend_win()
    }
}

/// Walks a [`Node`] tree by child index.
#[derive(Debug)]
pub struct StubTree {
    root: Node,
    path: Vec<usize>,
    pub evaluations: Cell<u64>,
    pub deepest: usize,
}

impl StubTree {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            path: Vec::new(),
            evaluations: Cell::new(0),
            deepest: 0,
        }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    fn current(&self) -> &Node {
        self.path
            .iter()
            .fold(&self.root, |node, &i| &node.children[i])
    }
}

impl SearchTree for StubTree {
    type Move = usize;

    fn legal_moves(&self) -> Vec<usize> {
        (0..self.current().children.len()).collect()
    }

    fn apply(&mut self, mv: usize) {
        self.path.push(mv);
        self.deepest = self.deepest.max(self.path.len());
    }

    fn undo(&mut self) {
        self.path.pop();
    }

    fn evaluate(&self, _perspective: Color) -> Evaluation {
        self.evaluations.set(self.evaluations.get() + 1);
        self.current().value
    }
}
