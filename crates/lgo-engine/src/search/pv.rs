//! The PV layer: wraps an inner policy to additionally retain the full
//! principal-variation chain, attaching a searched child as the parent's
//! tail exactly when its value falls strictly inside the *entry* window
//! `(ab0, beta0)` — not whatever `alpha`/`beta` have narrowed to by the
//! time this particular sibling was searched.

use lgo_core::{Cell, Move, State};

use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::Node;

pub struct Pv<Inner> {
    inner: Inner,
}

impl<Inner> Pv<Inner> {
    pub fn new(inner: Inner) -> Pv<Inner> {
        Pv { inner }
    }

    pub fn inner_mut(&mut self) -> &mut Inner {
        &mut self.inner
    }
}

impl<Inner: PolicyHooks> PolicyHooks for Pv<Inner> {
    fn alpha_init(&self, size: u8) -> i32 {
        self.inner.alpha_init(size)
    }

    fn beta_init(&self, size: u8) -> i32 {
        self.inner.beta_init(size)
    }

    fn init_node(&mut self, state: &mut State, alpha: i32, beta: i32) -> Option<Node> {
        self.inner.init_node(state, alpha, beta)
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
        let value = child.minimax;
        self.inner.update(parent, child.clone(), mv, to_play, alpha, beta, window);

        let became_best = parent.best_move == Some(mv);
        let inside_entry_window = value > window.alpha0 && value < window.beta0;
        if became_best && inside_entry_window {
            let mut tail = child;
            tail.mv = Some(mv);
            parent.child = Some(Box::new(tail));
        }
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
    fn pv_chain_reconstructs_full_sequence() {
        // On a 1-cell board Black's only winning line is to play the only
        // cell immediately; White and Black then both pass (no legal move
        // left) and the game ends with Black owning the board.
        let mut hooks = Pv::new(Minimax::new());
        let mut state = State::new(1);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(1), hooks.beta_init(1));
        let node = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert_eq!(
            node.pv_line(),
            vec![Move::play(Cell::Black, 0), Move::pass(Cell::White), Move::pass(Cell::Black)]
        );
    }
}
