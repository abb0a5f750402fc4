//! Tapered PeSTO evaluation.

use chess_core::pesto::{phase_weight, score_contribution, TOTAL_PHASE};
use chess_core::{Color, Position};

use crate::evaluation::Evaluation;

/// Evaluates the position for `perspective`, the side the engine plays.
///
/// Terminal positions come first: a checkmate is a mate in one for whoever
/// delivered it, a stalemate is a draw regardless of material. Otherwise
/// the middlegame and endgame scores are blended by the remaining material.
pub fn evaluate(pos: &Position, perspective: Color) -> Evaluation {
    if !pos.has_legal_moves() {
        if !pos.in_check() {
            return Evaluation::DRAW;
        }
        return if pos.side_to_move() == perspective {
            Evaluation::MateIn(-1)
        } else {
            Evaluation::MateIn(1)
        };
    }

    let white_cp = tapered_score(pos);
    Evaluation::Centipawn(match perspective {
        Color::White => white_cp,
        Color::Black => -white_cp,
    })
}

/// White-minus-Black score, interpolated between middlegame and endgame.
pub fn tapered_score(pos: &Position) -> i32 {
    let mut mg = [0i32; 2];
    let mut eg = [0i32; 2];
    let mut phase = 0;

    for (piece, color, square) in pos.pieces() {
        let (m, e) = score_contribution(piece, color, square);
        mg[color as usize] += m;
        eg[color as usize] += e;
        phase += phase_weight(piece);
    }

    let mg_phase = phase.min(TOTAL_PHASE);
    let eg_phase = TOTAL_PHASE - mg_phase;
    let mg_score = mg[Color::White as usize] - mg[Color::Black as usize];
    let eg_score = eg[Color::White as usize] - eg[Color::Black as usize];

    let blended = (mg_score * mg_phase + eg_score * eg_phase) as f64 / TOTAL_PHASE as f64;
    blended.round() as i32
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
