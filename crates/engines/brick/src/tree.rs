//! The game tree as the search sees it.

use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

use chess_core::{Color, Move, Position};

use crate::eval::evaluate;
use crate::evaluation::Evaluation;

/// A position that can be walked in place.
///
/// `apply` and `undo` pair up strictly LIFO; the search never holds two
/// applied moves at the same depth.
pub trait SearchTree {
    type Move: Copy + PartialEq + Debug;

    /// Legal moves in a stable order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn apply(&mut self, mv: Self::Move);

    fn undo(&mut self);

    /// Static score of the current node for `perspective`, terminal
    /// outcomes included.
    fn evaluate(&self, perspective: Color) -> Evaluation;
}

impl SearchTree for Position {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        Position::legal_moves(self)
    }

    fn apply(&mut self, mv: Move) {
        Position::apply(self, mv)
    }

    fn undo(&mut self) {
        Position::undo(self)
    }

    fn evaluate(&self, perspective: Color) -> Evaluation {
        evaluate(self, perspective)
    }
}

/// A move applied to a tree, taken back when the guard is dropped.
///
/// Every exit from a child search (normal return, cutoff, short-circuit)
/// goes through the drop, so the tree is always restored.
pub struct Applied<'a, T: SearchTree> {
    tree: &'a mut T,
}

impl<'a, T: SearchTree> Applied<'a, T> {
    pub fn new(tree: &'a mut T, mv: T::Move) -> Self {
        tree.apply(mv);
        Self { tree }
    }
}

impl<T: SearchTree> Deref for Applied<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.tree
    }
}

impl<T: SearchTree> DerefMut for Applied<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.tree
    }
}

impl<T: SearchTree> Drop for Applied<'_, T> {
    fn drop(&mut self) {
        self.tree.undo();
    }
}
