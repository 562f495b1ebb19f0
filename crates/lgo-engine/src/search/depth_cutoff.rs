//! The depth-cutoff layer: beyond a configurable ply limit, a node is
//! treated as a heuristic leaf rather than searched further. This is what
//! lets the driver in [`crate::search`] bound the work of one outer
//! iteration — everything past `cutoff` plies returns immediately with an
//! inexact value instead of recursing to the true end of the game.
//!
//! Sits inside the conjecture layers (see the stack built in
//! [`crate::search::Searcher::new`]) so a conjecture still gets to recognize
//! an already-decided position even past the cutoff — the whole point of a
//! conjecture is to prune subtrees a depth limit alone would still have to
//! search.

use lgo_core::{Cell, Move, State};

use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::{Node, NodeType};

/// The value a cutoff leaf reports. Area-scored Linear Go has no partial
/// evaluation function beyond the board's own territory count, so the
/// heuristic is the live minimax value itself — a named wrapper so a
/// future static evaluator has one place to slot in.
fn heuristic_score(board_minimax: i32) -> i32 {
    board_minimax
}

pub struct DepthCutoff<Inner> {
    inner: Inner,
    cutoff: u32,
}

impl<Inner> DepthCutoff<Inner> {
    pub fn new(inner: Inner, cutoff: u32) -> DepthCutoff<Inner> {
        DepthCutoff { inner, cutoff }
    }

    pub fn set_cutoff(&mut self, cutoff: u32) {
        self.cutoff = cutoff;
    }

    pub fn cutoff(&self) -> u32 {
        self.cutoff
    }
}

impl<Inner: PolicyHooks> PolicyHooks for DepthCutoff<Inner> {
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
        if (state.depth() as u32) < self.cutoff {
            return None;
        }
        Some(Node {
            node_type: NodeType::Nil,
            exact: false,
            minimax: heuristic_score(state.board.minimax()),
            ..Node::default()
        })
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
    use lgo_core::Move;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn cutoff_of_zero_returns_the_root_heuristic_immediately() {
        let mut hooks = DepthCutoff::new(Minimax::new(), 0);
        let mut state = State::new(4);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(4), hooks.beta_init(4));
        let node = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert_eq!(node.minimax, 0);
        assert!(!node.exact);
        assert_eq!(node.best_move, None);
    }

    #[test]
    fn generous_cutoff_still_reaches_an_exact_terminal() {
        let mut hooks = DepthCutoff::new(Minimax::new(), 64);
        let mut state = State::new(1);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(1), hooks.beta_init(1));
        let node = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert_eq!(node.minimax, 1);
        assert_eq!(node.best_move, Some(Move::play(Cell::Black, 0)));
    }
}
