use std::time::Duration;

use cozy_chess::{Board, Color, File, Move, Piece, Square};

use crate::board::Position;
use crate::error::{ChessError, Result};
use crate::time_control::ClockParams;

/// Long algebraic notation for `mv`, played from `board`.
///
/// The rules authority encodes castling as the king capturing its own rook;
/// that is rendered as the usual two-square king move (`e1g1`, `e8c8`).
pub fn move_to_uci(board: &Board, mv: Move) -> String {
    let is_castle = board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to) == Some(board.side_to_move());
    if !is_castle {
        return mv.to_string();
    }
    let file = if (mv.to.file() as u8) > (mv.from.file() as u8) {
        File::G
    } else {
        File::C
    };
    let to = Square::new(file, mv.from.rank());
    format!("{}{}", mv.from, to)
}

pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move> {
    // Match against legal moves so castling and promotions come out right.
    let wanted = txt.to_ascii_lowercase();
    pos.legal_moves()
        .into_iter()
        .find(|&mv| move_to_uci(pos.board(), mv) == wanted)
        .ok_or_else(|| ChessError::IllegalMove {
            mv: txt.to_string(),
        })
}

/// Builds the position described by the arguments of a `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
///
/// Nothing is applied unless every part of the command is valid.
pub fn position_from_uci(args: &[&str]) -> Result<Position> {
    let (mut pos, rest) = match args.first().copied() {
        Some("startpos") => (Position::startpos(), &args[1..]),
        Some("fen") => {
            let end = args
                .iter()
                .position(|&tok| tok == "moves")
                .unwrap_or(args.len());
            (Position::from_fen(&args[1..end].join(" "))?, &args[end..])
        }
        other => {
            return Err(ChessError::MissingPositionKind {
                found: other.map(str::to_string),
            })
        }
    };

    if rest.first() == Some(&"moves") {
        for txt in &rest[1..] {
            let mv = parse_uci_move(&pos, txt)?;
            pos.play(mv)?;
        }
    }
    Ok(pos)
}

/// Arguments of a `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub move_time: Option<Duration>,
    pub wtime: Option<Duration>,
    pub btime: Option<Duration>,
    pub winc: Option<Duration>,
    pub binc: Option<Duration>,
    pub moves_to_go: Option<u32>,
    pub depth: Option<u32>,
    pub infinite: bool,
}

impl GoParams {
    /// Parses `go` arguments in any order. Unknown tokens are skipped.
    pub fn parse(args: &[&str]) -> Result<Self> {
        let mut params = GoParams::default();
        let mut tokens = args.iter().copied();
        while let Some(tok) = tokens.next() {
            match tok {
                "movetime" => params.move_time = Some(millis(tok, tokens.next())?),
                "wtime" => params.wtime = Some(millis(tok, tokens.next())?),
                "btime" => params.btime = Some(millis(tok, tokens.next())?),
                "winc" => params.winc = Some(millis(tok, tokens.next())?),
                "binc" => params.binc = Some(millis(tok, tokens.next())?),
                "movestogo" => params.moves_to_go = Some(number(tok, tokens.next())?),
                "depth" => params.depth = Some(number(tok, tokens.next())?),
                "infinite" => params.infinite = true,
                _ => {}
            }
        }
        Ok(params)
    }

    /// Time-control inputs for `side`. `infinite` overrides everything.
    pub fn clock_for(&self, side: Color) -> ClockParams {
        if self.infinite {
            return ClockParams::default();
        }
        ClockParams {
            move_time: self.move_time,
            remaining: match side {
                Color::White => self.wtime,
                Color::Black => self.btime,
            },
        }
    }
}

fn number<T: std::str::FromStr>(option: &str, value: Option<&str>) -> Result<T> {
    let value = value.ok_or_else(|| ChessError::MissingValue {
        option: option.to_string(),
    })?;
    value.parse().map_err(|_| ChessError::InvalidNumber {
        option: option.to_string(),
        value: value.to_string(),
    })
}

/// Some interfaces send negative clock values after a flag fall.
fn millis(option: &str, value: Option<&str>) -> Result<Duration> {
    let ms: i64 = number(option, value)?;
    Ok(Duration::from_millis(ms.max(0) as u64))
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
