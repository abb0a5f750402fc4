//! UCI command handling.
//!
//! Commands are read on the caller's thread. A `go` hands the position to a
//! worker thread so `stop`, `isready` and `quit` keep being answered while
//! the engine thinks. Everything the worker prints goes through the same
//! locked writer as the session's own replies.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use brick_engine::{BrickEngine, DepthReport, SearchEvent, SearchResult};
use chess_core::{move_to_uci, position_from_uci, Board, GoParams, Move, Position, StopFlag};
use tracing::{debug, warn};

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

struct RunningSearch {
    stop: StopFlag,
    thread: JoinHandle<()>,
}

pub struct UciSession<W: Write + Send + 'static> {
    engine: BrickEngine,
    position: Position,
    out: Arc<Mutex<W>>,
    search: Option<RunningSearch>,
}

fn send<W: Write>(out: &Mutex<W>, line: &str) -> io::Result<()> {
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    writeln!(out, "{line}")?;
    out.flush()
}

fn report_line(board: &Board, report: &DepthReport<Move>) -> String {
    format!(
        "info depth {} nodes {} nps {} score {} pv {}",
        report.depth,
        report.nodes,
        report.nps,
        report.evaluation,
        move_to_uci(board, report.best_move)
    )
}

fn event_line(board: &Board, event: &SearchEvent<Move>) -> String {
    match event {
        SearchEvent::CurrentMove { depth, mv, number } => format!(
            "info depth {depth} currmove {} currmovenumber {number}",
            move_to_uci(board, *mv)
        ),
        SearchEvent::DepthCompleted(report) => report_line(board, report),
    }
}

fn result_lines(board: &Board, result: &SearchResult) -> Vec<String> {
    match result.best_move {
        Some(mv) => {
            let uci = move_to_uci(board, mv);
            vec![
                format!(
                    "info depth {} nodes {} nps {} score {} pv {uci}",
                    result.depth, result.nodes, result.nps, result.evaluation
                ),
                format!("bestmove {uci}"),
            ]
        }
        None => vec!["bestmove 0000".to_string()],
    }
}

impl<W: Write + Send + 'static> UciSession<W> {
    pub fn new(engine: BrickEngine, out: W) -> Self {
        Self {
            engine,
            position: Position::startpos(),
            out: Arc::new(Mutex::new(out)),
            search: None,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn is_searching(&self) -> bool {
        self.search
            .as_ref()
            .is_some_and(|search| !search.thread.is_finished())
    }

    /// Handles one input line. Only output failures are errors; bad
    /// requests are answered with `info string` and otherwise ignored.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };
        debug!(command, "uci command");

        match command {
            "uci" => {
                let name = format!("id name {} {}", self.engine.name(), env!("CARGO_PKG_VERSION"));
                self.send(&name)?;
                let author = format!("id author {}", self.engine.author());
                self.send(&author)?;
                self.send("uciok")?;
            }
            "isready" => self.send("readyok")?,
            "ucinewgame" => {
                self.stop_search();
                self.engine.new_game();
                self.position = Position::startpos();
            }
            "position" => {
                self.stop_search();
                match position_from_uci(args) {
                    Ok(pos) => self.position = pos,
                    Err(e) => self.reject(line, &e.to_string())?,
                }
            }
            "go" => {
                self.stop_search();
                match GoParams::parse(args) {
                    Ok(go) => self.start_search(go),
                    Err(e) => self.reject(line, &e.to_string())?,
                }
            }
            "stop" => self.stop_search(),
            "quit" => {
                self.stop_search();
                return Ok(Flow::Quit);
            }
            _ => debug!(command, "ignoring unknown command"),
        }
        Ok(Flow::Continue)
    }

    /// Stops any running search and waits for its `bestmove`.
    pub fn stop_search(&mut self) {
        if let Some(search) = self.search.take() {
            search.stop.stop();
            if search.thread.join().is_err() {
                warn!("search thread panicked");
            }
        }
    }

    fn start_search(&mut self, go: GoParams) {
        let stop = StopFlag::new();
        let mut engine = self.engine.clone();
        let root = self.position.clone();
        let out = Arc::clone(&self.out);
        let flag = stop.clone();

        let thread = thread::spawn(move || {
            let board = root.board().clone();
            let result = engine.think(&root, &go, flag, |event| {
                if let Err(e) = send(&out, &event_line(&board, &event)) {
                    warn!(error = %e, "failed to write search info");
                }
            });
            for line in result_lines(&board, &result) {
                if let Err(e) = send(&out, &line) {
                    warn!(error = %e, "failed to write search result");
                }
            }
        });
        self.search = Some(RunningSearch { stop, thread });
    }

    fn reject(&self, line: &str, reason: &str) -> io::Result<()> {
        warn!(line, reason, "rejected command");
        self.send(&format!("info string {reason}"))
    }

    fn send(&self, line: &str) -> io::Result<()> {
        send(&self.out, line)
    }
}

impl<W: Write + Send + 'static> Drop for UciSession<W> {
    fn drop(&mut self) {
        self.stop_search();
    }
}
