use cozy_chess::{Board, Color, Move, Piece, Square};

use crate::error::{ChessError, Result};

/// A chess position with LIFO apply/undo on top of the rules authority.
///
/// The underlying `cozy_chess::Board` is copy-make; `apply` keeps the
/// previous board on an undo stack so the search can walk the tree in place.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    undo_stack: Vec<Board>,
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            undo_stack: Vec::with_capacity(64),
        }
    }

    /// Parses standard or Shredder FEN. The board is validated on
    /// construction, so a `Position` can always enumerate its legal moves.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let board = fen.trim().parse::<Board>().map_err(|_| ChessError::InvalidFen {
            fen: fen.trim().to_string(),
        })?;
        Ok(Self::from_board(board))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Legal moves in generator order. The order is deterministic for a
    /// given board, which keeps root re-ordering meaningful across depths.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|piece_moves| !piece_moves.is_empty())
    }

    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_legal_moves()
    }

    /// Plays a move generated for this position and remembers how to take
    /// it back. Must be paired with [`Position::undo`].
    pub fn apply(&mut self, mv: Move) {
        let mut next = self.board.clone();
        next.play_unchecked(mv);
        self.undo_stack.push(std::mem::replace(&mut self.board, next));
    }

    /// Takes back the most recent [`Position::apply`]. No-op on an empty stack.
    pub fn undo(&mut self) {
        if let Some(prev) = self.undo_stack.pop() {
            self.board = prev;
        }
    }

    /// Number of moves that can still be taken back.
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    /// Checked move application for external input. The move becomes part
    /// of the game and cannot be undone.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if !self.legal_moves().contains(&mv) {
            return Err(ChessError::IllegalMove { mv: mv.to_string() });
        }
        self.board.play_unchecked(mv);
        self.undo_stack.clear();
        Ok(())
    }

    /// Every piece on the board as `(piece, color, square)`.
    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Color, Square)> + '_ {
        Color::ALL.into_iter().flat_map(move |color| {
            Piece::ALL.into_iter().flat_map(move |piece| {
                self.board
                    .colored_pieces(color, piece)
                    .into_iter()
                    .map(move |sq| (piece, color, sq))
            })
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
