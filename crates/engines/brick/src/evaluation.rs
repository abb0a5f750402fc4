//! Search scores.
//!
//! A score is one of three kinds: a centipawn estimate, a forced mate
//! counted in whole moves, or an infinite window bound. They are ranked,
//! best first for the engine:
//!
//! ```text
//! +inf > mate 1 > mate 2 > ... > cp +v > ... > cp -v > ... > mate -2 > mate -1 > -inf
//! ```
//!
//! Every max/min and every cutoff in the search goes through this order.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluation {
    /// Positional and material estimate; positive favours the engine
    Centipawn(i32),
    /// Forced mate in `n` moves; `n > 0` when the engine mates, `n < 0`
    /// when the engine is mated
    MateIn(i32),
    /// Alpha/beta starting bound, never a reported score
    Infinity(Sign),
}

impl Evaluation {
    pub const INFINITY: Evaluation = Evaluation::Infinity(Sign::Positive);
    pub const NEG_INFINITY: Evaluation = Evaluation::Infinity(Sign::Negative);
    pub const DRAW: Evaluation = Evaluation::Centipawn(0);

    /// (tier, key within tier); larger is better.
    fn rank(self) -> (u8, i64) {
        match self {
            Evaluation::Infinity(Sign::Negative) => (0, 0),
            Evaluation::MateIn(n) if n <= 0 => (1, -(n as i64)),
            Evaluation::Centipawn(v) => (2, v as i64),
            Evaluation::MateIn(n) => (3, -(n as i64)),
            Evaluation::Infinity(Sign::Positive) => (4, 0),
        }
    }

    pub fn is_winning_mate(self) -> bool {
        matches!(self, Evaluation::MateIn(n) if n > 0)
    }

    pub fn is_losing_mate(self) -> bool {
        matches!(self, Evaluation::MateIn(n) if n < 0)
    }

    /// Pushes a mate suffered by the engine one move further away.
    /// Other scores pass through.
    pub fn extend_loss(self) -> Self {
        match self {
            Evaluation::MateIn(n) if n < 0 => Evaluation::MateIn(n - 1),
            other => other,
        }
    }

    /// Pushes a mate delivered by the engine one move further away.
    /// Other scores pass through.
    pub fn extend_win(self) -> Self {
        match self {
            Evaluation::MateIn(n) if n > 0 => Evaluation::MateIn(n + 1),
            other => other,
        }
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Protocol score notation: `cp 35`, `mate 3`, `mate -2`.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Evaluation::Centipawn(v) => write!(f, "cp {v}"),
            Evaluation::MateIn(n) => write!(f, "mate {n}"),
            Evaluation::Infinity(Sign::Positive) => f.write_str("inf"),
            Evaluation::Infinity(Sign::Negative) => f.write_str("-inf"),
        }
    }
}

#[cfg(test)]
#[path = "evaluation_tests.rs"]
mod evaluation_tests;
