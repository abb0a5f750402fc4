//! Tests for the UCI session
//!
//! This module covers:
//! - Handshake replies
//! - Position setup and rejected input
//! - Search output (info lines, bestmove) from the worker thread
//! - Stopping and quitting mid-search

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use brick_engine::BrickEngine;
use brick_uci::{Flow, UciSession};
use chess_core::{move_to_uci, Color, Piece, Position, Square};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn wait_for_bestmove(&self) -> String {
        let deadline = Instant::now() + Duration::from_secs(30);
        loop {
            if let Some(line) = self.lines().into_iter().find(|l| l.starts_with("bestmove")) {
                return line;
            }
            assert!(Instant::now() < deadline, "no bestmove in {:?}", self.lines());
            thread::sleep(Duration::from_millis(10));
        }
    }
}

fn session() -> (UciSession<SharedBuf>, SharedBuf) {
    let out = SharedBuf::default();
    (UciSession::new(BrickEngine::default(), out.clone()), out)
}

fn send(session: &mut UciSession<SharedBuf>, lines: &[&str]) {
    for line in lines {
        assert_eq!(session.handle_line(line).unwrap(), Flow::Continue);
    }
}

fn startpos_fen() -> String {
    Position::startpos().board().to_string()
}

// =============================================================================
// Handshake
// =============================================================================

#[test]
fn test_uci_handshake() {
    let (mut s, out) = session();
    send(&mut s, &["uci", "isready"]);

    let lines = out.lines();
    assert!(lines[0].starts_with("id name Brick"));
    assert!(lines[1].starts_with("id author "));
    assert_eq!(lines[2], "uciok");
    assert_eq!(lines[3], "readyok");
}

#[test]
fn test_blank_and_unknown_lines_are_ignored() {
    let (mut s, out) = session();
    send(&mut s, &["", "   ", "setoption name Hash value 16", "debug on"]);
    assert!(out.lines().is_empty());
}

#[test]
fn test_quit_ends_session() {
    let (mut s, _) = session();
    assert_eq!(s.handle_line("quit").unwrap(), Flow::Quit);
}

// =============================================================================
// Position Setup
// =============================================================================

#[test]
fn test_position_with_moves() {
    let (mut s, _) = session();
    send(&mut s, &["position startpos moves e2e4 e7e5 g1f3"]);

    let board = s.position().board();
    assert_eq!(s.position().side_to_move(), Color::Black);
    assert_eq!(board.piece_on(Square::E4), Some(Piece::Pawn));
    assert_eq!(board.piece_on(Square::F3), Some(Piece::Knight));
}

#[test]
fn test_bad_fen_is_rejected_and_position_kept() {
    let (mut s, out) = session();
    send(&mut s, &["position fen not/a/real/fen w - - 0 1"]);

    let lines = out.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("info string invalid FEN"));
    assert_eq!(s.position().board().to_string(), startpos_fen());
}

#[test]
fn test_illegal_move_is_rejected() {
    let (mut s, out) = session();
    send(&mut s, &["position startpos moves e2e4", "position startpos moves e2e5"]);

    assert_eq!(out.lines(), vec!["info string illegal move: e2e5".to_string()]);
    // The earlier good position survives the rejected one
    assert_eq!(s.position().board().piece_on(Square::E4), Some(Piece::Pawn));
}

#[test]
fn test_ucinewgame_resets_position() {
    let (mut s, _) = session();
    send(&mut s, &["position startpos moves d2d4", "ucinewgame"]);
    assert_eq!(s.position().board().to_string(), startpos_fen());
}

// =============================================================================
// Searching
// =============================================================================

#[test]
fn test_go_depth_reports_each_depth() {
    let (mut s, out) = session();
    send(&mut s, &["position startpos", "go depth 2"]);
    let bestmove = out.wait_for_bestmove();

    let lines = out.lines();
    assert!(lines
        .iter()
        .any(|l| l.starts_with("info depth 1 currmove ") && l.ends_with("currmovenumber 1")));
    assert!(lines.iter().any(|l| l.starts_with("info depth 1 nodes ")));
    assert!(lines.iter().any(|l| l.starts_with("info depth 2 nodes ")));
    assert!(lines.iter().all(|l| !l.starts_with("info depth 3")));

    let mv = bestmove.trim_start_matches("bestmove ");
    let start = Position::startpos();
    let legal: Vec<String> = start
        .legal_moves()
        .into_iter()
        .map(|m| move_to_uci(start.board(), m))
        .collect();
    assert!(legal.iter().any(|m| m == mv), "{mv} is not legal");
}

#[test]
fn test_mate_is_reported_with_mate_score() {
    let (mut s, out) = session();
    send(
        &mut s,
        &["position fen 6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", "go movetime 5000"],
    );

    assert_eq!(out.wait_for_bestmove(), "bestmove e1e8");
    let lines = out.lines();
    assert!(lines.iter().any(|l| l.ends_with("score mate 1 pv e1e8")));
}

#[test]
fn test_no_legal_move_gives_null_bestmove() {
    let (mut s, out) = session();
    send(&mut s, &["position fen k7/2K5/1Q6/8/8/8/8/8 b - - 0 1", "go movetime 100"]);
    assert_eq!(out.wait_for_bestmove(), "bestmove 0000");
}

#[test]
fn test_malformed_go_is_rejected() {
    let (mut s, out) = session();
    send(&mut s, &["go movetime soon"]);

    let lines = out.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("info string invalid value"));
    assert!(!s.is_searching());
}

#[test]
fn test_stop_ends_infinite_search_with_bestmove() {
    let (mut s, out) = session();
    send(&mut s, &["position startpos", "go infinite"]);
    thread::sleep(Duration::from_millis(50));
    send(&mut s, &["isready"]);
    assert!(out.lines().iter().any(|l| l == "readyok"));

    send(&mut s, &["stop"]);
    // stop waits for the worker, so the answer is already written
    assert!(out.lines().iter().any(|l| l.starts_with("bestmove ")));
    assert!(!s.is_searching());
}

#[test]
fn test_quit_during_search_still_answers() {
    let (mut s, out) = session();
    send(&mut s, &["position startpos", "go infinite"]);
    assert_eq!(s.handle_line("quit").unwrap(), Flow::Quit);
    assert!(out.lines().iter().any(|l| l.starts_with("bestmove ")));
}
