//! The base policy layer: plain alpha-beta minimax with no memory of past
//! searches and no pruning beyond the window itself. Every other layer
//! wraps this one, directly or through another wrapper.

use lgo_core::{Cell, Move, State};

use crate::search::good_player::GoodPlayer;
use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::{Node, NodeType};

pub struct Minimax {
    move_gen: GoodPlayer,
}

impl Minimax {
    pub fn new() -> Minimax {
        Minimax {
            move_gen: GoodPlayer::new(),
        }
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyHooks for Minimax {
    /// `size + 1`, not `size`: a minimax value can equal the board size
    /// exactly (total territory for one side), and a window bounded by
    /// `size` on the nose returns the wrong principal variation in that
    /// case.
    fn alpha_init(&self, size: u8) -> i32 {
        -(size as i32 + 1)
    }

    fn beta_init(&self, size: u8) -> i32 {
        size as i32 + 1
    }

    fn init_node(&mut self, state: &mut State, _alpha: i32, _beta: i32) -> Option<Node> {
        if state.terminal() {
            return Some(Node {
                node_type: NodeType::Pv,
                exact: true,
                minimax: state.board.minimax(),
                ..Node::default()
            });
        }
        None
    }

    fn on_enter(&mut self, _state: &mut State, _alpha: i32, _beta: i32) {}

    fn pre_update(&mut self, _state: &mut State, _mv: Move) -> bool {
        true
    }

    fn gen_moves(&mut self, state: &mut State, color: Cell) -> Vec<Move> {
        self.move_gen.moves(state, color)
    }

    /// Tracks only the best value and move seen so far. Building the full
    /// principal-variation chain (`parent.child`) is the [`Pv`](crate::search::pv::Pv)
    /// layer's job, not the base layer's — plain minimax doesn't need to
    /// remember more than one ply back.
    ///
    /// `parent.exact` accumulates as a conjunction over only the children
    /// that actually bear on the parent's value: the one that becomes the
    /// new best move, and any that land strictly inside the window that
    /// was live when they were searched. A child that's neither (cut off
    /// by a sibling, or outside the window) doesn't get a say — its own
    /// inexactness can't contaminate a parent that never relied on it.
    fn update(
        &mut self,
        parent: &mut Node,
        child: Node,
        mv: Move,
        to_play: Cell,
        _alpha: i32,
        _beta: i32,
        window: WindowSnapshot,
    ) {
        let first = parent.best_move.is_none();
        let better = first
            || match to_play {
                Cell::Black => child.minimax > parent.minimax,
                Cell::White => child.minimax < parent.minimax,
                Cell::Empty => unreachable!("the side to play is always a stone color"),
            };
        let inside_window = child.minimax > window.alpha0 && child.minimax < window.beta0;

        if better {
            parent.minimax = child.minimax;
            parent.best_move = Some(mv);
        }
        if better || inside_window {
            parent.exact = if first { child.exact } else { parent.exact && child.exact };
        }
    }

    fn on_exit(&mut self, _state: &mut State, _node: &mut Node) {}
}
