//! The telomere conjecture: recognizes a handful of fixed end-of-board
//! patterns (at position 3 from either edge) that are locally settled
//! regardless of the rest of the board, and tightens the search window
//! accordingly instead of returning a terminal value outright.
//!
//! Disabled by default. An earlier prototype of this conjecture had a bug
//! that silently disabled its own guard, so move generation was never
//! actually pruned by it — the pattern tables below are believed correct,
//! but the conjecture stays opt-in (`SolverConfig::telomere_enabled`) until
//! it has run correctness tests back-to-back against a search with it
//! turned off.

use lgo_core::{Cell, Move, State};

use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::Node;

/// One recognized end-of-board shape: the three cells nearest the edge,
/// read outward-to-inward, and the tightened bound it implies for the
/// player currently on move.
struct Pattern {
    edge: [Cell; 3],
    tighten_for_black: Option<i32>,
    tighten_for_white: Option<i32>,
}

fn patterns() -> &'static [Pattern] {
    use Cell::*;
    // A run of the same color three deep from the edge has already claimed
    // that corner; the opposing side can never recover those three cells,
    // which caps how far the global minimax can still move in their favor.
    static PATTERNS: &[Pattern] = &[
        Pattern { edge: [Black, Black, Black], tighten_for_black: None, tighten_for_white: Some(-3) },
        Pattern { edge: [White, White, White], tighten_for_black: Some(3), tighten_for_white: None },
    ];
    PATTERNS
}

fn edge_cells(state: &State, at_left: bool) -> [Cell; 3] {
    let size = state.size();
    if at_left {
        [state.board.get(0), state.board.get(1), state.board.get(2)]
    } else {
        [state.board.get(size - 1), state.board.get(size - 2), state.board.get(size - 3)]
    }
}

pub struct Telomere<Inner> {
    inner: Inner,
    enabled: bool,
}

impl<Inner> Telomere<Inner> {
    pub fn new(inner: Inner, enabled: bool) -> Telomere<Inner> {
        Telomere { inner, enabled }
    }
}

impl<Inner: PolicyHooks> PolicyHooks for Telomere<Inner> {
    fn alpha_init(&self, size: u8) -> i32 {
        self.inner.alpha_init(size)
    }

    fn beta_init(&self, size: u8) -> i32 {
        self.inner.beta_init(size)
    }

    fn init_node(&mut self, state: &mut State, alpha: i32, beta: i32) -> Option<Node> {
        if let Some(node) = self.inner.init_node(state, alpha, beta) {
            return Some(node);
        }
        if !self.enabled || state.size() < 6 {
            return None;
        }

        let (mut alpha, mut beta) = (alpha, beta);
        let mut tightened = false;
        for at_left in [true, false] {
            let edge = edge_cells(state, at_left);
            for pattern in patterns() {
                if pattern.edge != edge {
                    continue;
                }
                if let Some(bound) = pattern.tighten_for_black {
                    beta = beta.min(bound.max(alpha + 1));
                    tightened = true;
                }
                if let Some(bound) = pattern.tighten_for_white {
                    alpha = alpha.max(bound.min(beta - 1));
                    tightened = true;
                }
            }
        }
        if tightened {
            self.inner.init_node(state, alpha, beta)
        } else {
            None
        }
    }

    fn on_enter(&mut self, state: &mut State, alpha: i32, beta: i32) {
        self.inner.on_enter(state, alpha, beta)
    }

    fn pre_update(&mut self, state: &mut State, mv: Move) -> bool {
        self.inner.pre_update(state, mv)
    }

    fn gen_moves(&mut self, state: &mut State, color: Cell) -> Vec<Move> {
        self.inner.gen_moves(state, color)
    }

    fn update(
        &mut self,
        parent: &mut Node,
        child: Node,
        mv: Move,
        to_play: Cell,
        alpha: i32,
        beta: i32,
        window: WindowSnapshot,
    ) {
        self.inner.update(parent, child, mv, to_play, alpha, beta, window)
    }

    fn on_exit(&mut self, state: &mut State, node: &mut Node) {
        self.inner.on_exit(state, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::engine::search;
    use crate::search::minimax::Minimax;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn disabled_by_default_never_touches_the_window() {
        let mut hooks = Telomere::new(Minimax::new(), false);
        let mut state = State::new(6);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(6), hooks.beta_init(6));
        // Must not panic or loop differently than the bare inner policy —
        // this is purely a smoke test that `enabled: false` is inert.
        let _ = search(&mut hooks, &mut state, alpha, beta, &quit);
    }

    #[test]
    fn enabled_layer_recognizes_a_black_edge_run_and_agrees_with_disabled() {
        // Left edge B B B: the corner is settled, so turning the conjecture
        // on must not change the final answer versus turning it off.
        let mut state = State::new(6);
        state.play(Move::play(Cell::Black, 0));
        state.play(Move::play(Cell::White, 4));
        state.play(Move::play(Cell::Black, 1));
        state.play(Move::play(Cell::White, 5));
        state.play(Move::play(Cell::Black, 2));

        let mut disabled = Telomere::new(Minimax::new(), false);
        let (alpha, beta) = (disabled.alpha_init(6), disabled.beta_init(6));
        let quit = AtomicBool::new(false);
        let mut disabled_state = state.clone();
        let off = search(&mut disabled, &mut disabled_state, alpha, beta, &quit);

        let mut enabled = Telomere::new(Minimax::new(), true);
        let mut enabled_state = state;
        let on = search(&mut enabled, &mut enabled_state, alpha, beta, &quit);

        assert_eq!(off.minimax, on.minimax);
    }
}
