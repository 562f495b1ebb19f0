//! The metrics layer: counts recursive calls entered, independent of any
//! transposition table. Wraps the whole stack so a driver can report
//! "nodes searched" (the `i` inspect command) without coupling that
//! bookkeeping to whether a TT is even in use.

use std::sync::atomic::{AtomicU64, Ordering};

use lgo_core::{Cell, Move, State};

use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::Node;

pub struct Metrics<Inner> {
    inner: Inner,
    nodes: AtomicU64,
}

impl<Inner> Metrics<Inner> {
    pub fn new(inner: Inner) -> Metrics<Inner> {
        Metrics {
            inner,
            nodes: AtomicU64::new(0),
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn inner_mut(&mut self) -> &mut Inner {
        &mut self.inner
    }

    pub fn reset(&self) {
        self.nodes.store(0, Ordering::Relaxed);
    }
}

impl<Inner: PolicyHooks> PolicyHooks for Metrics<Inner> {
    fn alpha_init(&self, size: u8) -> i32 {
        self.inner.alpha_init(size)
    }

    fn beta_init(&self, size: u8) -> i32 {
        self.inner.beta_init(size)
    }

    fn init_node(&mut self, state: &mut State, alpha: i32, beta: i32) -> Option<Node> {
        self.nodes.fetch_add(1, Ordering::Relaxed);
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
    fn counts_one_node_per_recursive_call() {
        let mut hooks = Metrics::new(Minimax::new());
        let mut state = State::new(2);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(2), hooks.beta_init(2));
        let _ = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert!(hooks.nodes() > 0);
    }

    #[test]
    fn reset_zeroes_the_counter() {
        let mut hooks = Metrics::new(Minimax::new());
        let mut state = State::new(2);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(2), hooks.beta_init(2));
        let _ = search(&mut hooks, &mut state, alpha, beta, &quit);
        hooks.reset();
        assert_eq!(hooks.nodes(), 0);
    }
}
