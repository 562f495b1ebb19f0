//! Event-driven solver REPL: a worker thread runs the search while the main
//! thread keeps reading stdin, so `h` (halt) and `i` (inspect) arrive while
//! a `r` search is still in progress, split between a dedicated stdin
//! reader thread and per-search worker threads.

use std::io::{self, BufRead};
use std::sync::{mpsc, Arc, Mutex};

use tracing::{debug, info, warn};

use lgo_core::{Move, State};
use lgo_engine::{SearchControl, SearchOutcome, Searcher};

use crate::command::{parse_command, Command};
use crate::config::SolverConfig;
use crate::error::DriverError;

enum Status {
    Idle,
    Searching,
}

enum Event {
    Line(Result<Command, DriverError>),
    SearchDone(SearchDone),
    InputClosed,
}

struct SearchDone {
    outcome: SearchOutcome,
    searcher: Searcher,
}

/// Owns the board/history and the searcher, and drives the REPL loop.
pub struct SolverEngine {
    config: SolverConfig,
    state: State,
    searcher: Option<Searcher>,
    status: Status,
    control: SearchControl,
    /// Updated by the worker thread after every completed outer iteration,
    /// so `i` can report on an in-progress search from the main thread.
    latest: Arc<Mutex<Option<SearchOutcome>>>,
}

impl SolverEngine {
    /// Builds a fresh engine and applies the startup move prefix, asserting
    /// it's legal from the empty root — an invalid startup prefix is a
    /// configuration error, not something the REPL can recover from.
    pub fn new(config: SolverConfig) -> SolverEngine {
        let mut state = State::new(config.size);
        for mv in &config.moves {
            apply_move(&mut state, *mv).expect("invalid startup move prefix");
        }
        SolverEngine {
            searcher: Some(Searcher::new(config.searcher_config())),
            status: Status::Idle,
            control: SearchControl::new(),
            latest: Arc::new(Mutex::new(None)),
            state,
            config,
        }
    }

    /// Runs the REPL until stdin closes.
    pub fn run(mut self) -> Result<(), DriverError> {
        let (tx, rx) = mpsc::channel::<Event>();

        let stdin_tx = tx.clone();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        debug!(cmd = %trimmed, "received command");
                        if stdin_tx.send(Event::Line(parse_command(trimmed))).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        let _ = stdin_tx.send(Event::InputClosed);
                        break;
                    }
                }
            }
            let _ = stdin_tx.send(Event::InputClosed);
        });

        for event in &rx {
            match event {
                Event::Line(Ok(Command::Run(moves))) => self.handle_run(moves, &tx),
                Event::Line(Ok(Command::Halt)) => self.handle_halt(),
                Event::Line(Ok(Command::Inspect)) => self.handle_inspect(),
                Event::Line(Err(e)) => warn!(error = %e, "command error"),
                Event::SearchDone(done) => self.finish_search(done),
                Event::InputClosed => break,
            }
        }

        info!("solver shutting down");
        Ok(())
    }

    fn handle_run(&mut self, moves: Vec<Move>, tx: &mpsc::Sender<Event>) {
        if matches!(self.status, Status::Searching) {
            warn!("r received while a search is already running, ignoring");
            return;
        }

        let mut state = State::new(self.config.size);
        for mv in &moves {
            if let Err(e) = apply_move(&mut state, *mv) {
                warn!(error = %e, "rejecting r command");
                return;
            }
        }
        self.state = state;

        self.control.reset();
        *self.latest.lock().expect("latest outcome mutex poisoned") = None;

        let mut searcher = self.searcher.take().expect("searcher taken while idle");
        let mut state = self.state.clone();
        let (alpha, beta) = (self.config.alpha, self.config.beta);
        let quit = self.control.handle();
        let latest = Arc::clone(&self.latest);
        let tx = tx.clone();

        std::thread::spawn(move || {
            // `alpha`/`beta` came from `SolverConfig`, which already validated
            // `alpha <= beta` at construction, so the window is never
            // rejected here.
            let outcome = searcher
                .run(&mut state, alpha, beta, &quit, |iteration| {
                    println!(
                        "depth {} score {} nodes {} exact {} pv {}",
                        iteration.depth_cutoff,
                        iteration.minimax,
                        iteration.nodes,
                        iteration.exact,
                        pv_string(&iteration.pv),
                    );
                    if let Some(tree) = &iteration.tree {
                        println!("tree {tree}");
                    }
                    *latest.lock().expect("latest outcome mutex poisoned") = Some(iteration.clone());
                })
                .expect("SolverConfig already validated the search window");
            let _ = tx.send(Event::SearchDone(SearchDone { outcome, searcher }));
        });

        self.status = Status::Searching;
    }

    fn handle_halt(&mut self) {
        self.control.stop();
    }

    fn handle_inspect(&mut self) {
        match self.latest.lock().expect("latest outcome mutex poisoned").as_ref() {
            Some(outcome) => println!(
                "nodes {} score {} exact {}",
                outcome.nodes, outcome.minimax, outcome.exact
            ),
            None => println!("nodes 0 score 0 exact false"),
        }
    }

    fn finish_search(&mut self, done: SearchDone) {
        self.searcher = Some(done.searcher);
        self.status = Status::Idle;
        println!(
            "bestmove {}",
            done.outcome.best_move.map_or_else(|| "none".to_string(), |mv| mv.to_string())
        );
    }
}

/// Validates and plays one move from an external boundary, where `play`'s
/// own assertions are not acceptable failure modes: illegal input is a
/// fatal assertion *inside* the core, but the driver must not let a
/// malformed `r` command crash the process.
fn apply_move(state: &mut State, mv: Move) -> Result<(), DriverError> {
    if !mv.is_pass {
        if mv.position >= state.size() {
            return Err(DriverError::IllegalMove { mv });
        }
        if state.legal_moves(mv.color) & (1 << mv.position) == 0 {
            return Err(DriverError::IllegalMove { mv });
        }
    }
    if mv.color != state.side_to_play {
        return Err(DriverError::IllegalMove { mv });
    }
    state.play(mv);
    Ok(())
}

fn pv_string(pv: &[Move]) -> String {
    if pv.is_empty() {
        return "-".to_string();
    }
    pv.iter().map(|mv| mv.to_string()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgo_core::Cell;

    #[test]
    fn apply_move_rejects_out_of_turn_color() {
        let mut state = State::new(3);
        let err = apply_move(&mut state, Move::play(Cell::White, 0)).unwrap_err();
        assert!(matches!(err, DriverError::IllegalMove { .. }));
    }

    #[test]
    fn apply_move_rejects_out_of_range_position() {
        let mut state = State::new(3);
        let err = apply_move(&mut state, Move::play(Cell::Black, 9)).unwrap_err();
        assert!(matches!(err, DriverError::IllegalMove { .. }));
    }

    #[test]
    fn apply_move_accepts_a_legal_play() {
        let mut state = State::new(3);
        assert!(apply_move(&mut state, Move::play(Cell::Black, 1)).is_ok());
        assert_eq!(state.board.get(1), Cell::Black);
    }

    #[test]
    fn new_engine_applies_the_startup_move_prefix() {
        let config = SolverConfig::new(3, -4, 4).unwrap().with_moves(vec![Move::play(Cell::Black, 1)]);
        let engine = SolverEngine::new(config);
        assert_eq!(engine.state.board.get(1), Cell::Black);
    }
}
