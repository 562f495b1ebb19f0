//! The six-hook policy interface every search layer implements.
//!
//! The hook set is fixed and finite: new behavior (a conjecture, a
//! transposition table, iterative deepening) is added by wrapping another
//! layer around an existing one and overriding the hooks it cares about,
//! never by growing this trait.

use lgo_core::{Cell, Move, State};

use crate::search::node::Node;

/// The (alpha, beta) window a recursive call was *entered* with, threaded
/// alongside the possibly-already-narrowed `alpha`/`beta` arguments to
/// `update` so a PV layer can attach a child as the tail exactly when its
/// value lands strictly inside the entry window, not the live one.
#[derive(Debug, Clone, Copy)]
pub struct WindowSnapshot {
    pub alpha0: i32,
    pub beta0: i32,
}

pub trait PolicyHooks {
    /// Lower search-value bound for a fresh search on a board of this size.
    fn alpha_init(&self, size: u8) -> i32;
    /// Upper search-value bound for a fresh search on a board of this size.
    fn beta_init(&self, size: u8) -> i32;

    /// Called once per recursive call, before move generation. Returning
    /// `Some(node)` short-circuits the rest of the call with that node as
    /// the result: a terminal position, a conjecture's verdict, or a
    /// transposition table hit.
    fn init_node(&mut self, state: &mut State, alpha: i32, beta: i32) -> Option<Node>;

    /// Called once per recursive call, after `init_node` returns `None`,
    /// before move generation, for per-call setup.
    fn on_enter(&mut self, state: &mut State, alpha: i32, beta: i32);

    /// Called for each candidate move before the engine recurses into it.
    /// Returning `false` skips the move without searching it.
    fn pre_update(&mut self, state: &mut State, mv: Move) -> bool;

    /// Produces the ordered candidate moves for `color` to play.
    fn gen_moves(&mut self, state: &mut State, color: Cell) -> Vec<Move>;

    /// Folds one searched child into the running `parent` node. `to_play`
    /// is the color on move at `parent`; `window` is the entry window.
    fn update(
        &mut self,
        parent: &mut Node,
        child: Node,
        mv: Move,
        to_play: Cell,
        alpha: i32,
        beta: i32,
        window: WindowSnapshot,
    );

    /// Called once per recursive call, after the move loop completes (or is
    /// cut short), before the engine performs its own final classification.
    fn on_exit(&mut self, state: &mut State, node: &mut Node);
}
