//! Chess rules adapter and shared engine plumbing.
//!
//! `cozy-chess` is the rules authority; this crate adds what an engine
//! needs on top of it: in-place apply/undo, protocol move notation, PeSTO
//! evaluation tables and the time controller.

pub mod board;
pub mod error;
pub mod pesto;
pub mod time_control;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use time_control::*;
pub use uci::*;

pub use cozy_chess::{Board, Color, Move, Piece, Square};
