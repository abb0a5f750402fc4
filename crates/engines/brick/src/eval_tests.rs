use super::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

#[test]
fn test_start_position_is_balanced() {
    let start = Position::startpos();
    assert_eq!(evaluate(&start, Color::White), Evaluation::Centipawn(0));
    assert_eq!(evaluate(&start, Color::Black), Evaluation::Centipawn(0));
}

#[test]
fn test_perspective_flips_sign() {
    // White is a queen up
    let p = pos("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    let Evaluation::Centipawn(white) = evaluate(&p, Color::White) else {
        panic!("expected a centipawn score");
    };
    assert!(white > 800);
    assert_eq!(evaluate(&p, Color::Black), Evaluation::Centipawn(-white));
}

#[test]
fn test_stalemate_is_draw_regardless_of_material() {
    // Black to move, stalemated, but White has a queen
    let p = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert_eq!(evaluate(&p, Color::White), Evaluation::DRAW);
    assert_eq!(evaluate(&p, Color::Black), Evaluation::DRAW);
}

#[test]
fn test_checkmate_scores_mate_in_one() {
    // Black is mated
    let p = pos("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");
    assert_eq!(evaluate(&p, Color::White), Evaluation::MateIn(1));
    assert_eq!(evaluate(&p, Color::Black), Evaluation::MateIn(-1));
}

#[test]
fn test_endgame_tables_dominate_without_pieces() {
    // Kings and pawns only: phase is zero, so only endgame values count
    let p = pos("4k3/ppppppp1/8/8/8/8/PPPPPPPP/4K3 w - - 0 1");
    let mut eg_white = 0;
    let mut eg_black = 0;
    for (piece, color, square) in p.pieces() {
        let (_, eg) = score_contribution(piece, color, square);
        match color {
            Color::White => eg_white += eg,
            Color::Black => eg_black += eg,
        }
    }
    assert_eq!(tapered_score(&p), eg_white - eg_black);
}

#[test]
fn test_phase_is_clamped() {
    // Extra queens push the raw phase above the opening total
    let p = pos("qqq1kqqq/8/8/8/8/8/8/QQQQKQQQ w - - 0 1");
    let mut mg_white = 0;
    let mut mg_black = 0;
    for (piece, color, square) in p.pieces() {
        let (mg, _) = score_contribution(piece, color, square);
        match color {
            Color::White => mg_white += mg,
            Color::Black => mg_black += mg,
        }
    }
    assert_eq!(tapered_score(&p), mg_white - mg_black);
}
