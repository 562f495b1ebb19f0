//! The "full" conjecture: when one color's territory already equals the
//! entire board and the side that just moved has no legal reply left, the
//! outcome is settled and the subtree doesn't need searching.

use lgo_core::{Cell, Move, State};

use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::{Node, NodeType};

pub struct Full<Inner> {
    inner: Inner,
}

impl<Inner> Full<Inner> {
    pub fn new(inner: Inner) -> Full<Inner> {
        Full { inner }
    }
}

impl<Inner: PolicyHooks> PolicyHooks for Full<Inner> {
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
        let size = state.size() as i32;
        let minimax = state.board.minimax();
        if minimax.unsigned_abs() as i32 == size && state.legal_moves(state.side_to_play.flip()) == 0 {
            return Some(Node {
                node_type: NodeType::Pv,
                exact: true,
                minimax,
                ..Node::default()
            });
        }
        None
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
    fn fully_occupied_board_short_circuits() {
        // N=1: Black takes the only cell. side_to_play is now White, so
        // side_to_play.flip() (the side that just moved, Black) is checked
        // for a reply — there are no empty cells left at all, so it's
        // trivially zero and the conjecture fires without recursing.
        let mut hooks = Full::new(Minimax::new());
        let mut state = State::new(1);
        state.play(Move::play(Cell::Black, 0));
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(1), hooks.beta_init(1));
        let node = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert_eq!(node.minimax, 1);
        assert!(node.exact);
    }

    #[test]
    fn owner_with_an_empty_cell_left_does_not_short_circuit() {
        // N=3: Black plays the center, smearing the whole board to Black
        // territory, but cells 0 and 2 are still empty and legal for Black
        // to extend into — side_to_play.flip() (Black) has legal moves, so
        // the conjecture must not fire here even though minimax == size.
        let mut hooks = Full::new(Minimax::new());
        let mut state = State::new(3);
        state.play(Move::play(Cell::Black, 1));
        assert!(hooks.init_node(&mut state, -4, 4).is_none());
    }
}
