//! The generic recursive alpha-beta search, parameterized over a
//! [`PolicyHooks`] stack. This function is the only place recursion
//! happens; every layer only ever sees one call deep.

use std::sync::atomic::{AtomicBool, Ordering};

use lgo_core::{Cell, GameState, State};

use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::{Node, NodeType};

/// Runs one recursive alpha-beta call against `state` within `(alpha,
/// beta)`, using `hooks` for move generation, pruning, and memoization.
///
/// `quit` is checked before playing each move; once set, the move loop
/// stops early and whatever has been searched so far is classified and
/// returned, so a cooperative stop never loses the best move found up to
/// that point.
pub fn search<H: PolicyHooks>(hooks: &mut H, state: &mut State, alpha: i32, beta: i32, quit: &AtomicBool) -> Node {
    if let Some(mut node) = hooks.init_node(state, alpha, beta) {
        hooks.on_exit(state, &mut node);
        node.node_type = classify(node.minimax, alpha, beta);
        return node;
    }
    hooks.on_enter(state, alpha, beta);

    let to_play = state.side_to_play;
    let mut node = Node {
        exact: true,
        ..Node::default()
    };
    let (mut a, mut b) = (alpha, beta);

    // A pass already fixes the side to move's outcome at the board's
    // current score: nothing still in play can improve on it for them.
    if state.game_state == GameState::Pass {
        match to_play {
            Cell::Black => a = a.max(state.board.minimax()),
            Cell::White => b = b.min(state.board.minimax()),
            Cell::Empty => unreachable!("the side to play is always a stone color"),
        }
    }

    let moves = hooks.gen_moves(state, to_play);
    for mv in moves {
        if quit.load(Ordering::Relaxed) {
            break;
        }
        if !hooks.pre_update(state, mv) {
            continue;
        }

        state.play(mv);
        let child = search(hooks, state, a, b, quit);
        state.undo();

        hooks.update(&mut node, child, mv, to_play, a, b, WindowSnapshot { alpha0: alpha, beta0: beta });

        match to_play {
            Cell::Black => a = a.max(node.minimax),
            Cell::White => b = b.min(node.minimax),
            Cell::Empty => unreachable!("the side to play is always a stone color"),
        }
        if a >= b {
            break;
        }
    }

    hooks.on_exit(state, &mut node);
    node.node_type = classify(node.minimax, alpha, beta);
    node
}

/// Fail-soft classification against the window the call was *entered*
/// with, per the engine's final say over whatever provisional type a
/// layer's `update` hook may have set.
fn classify(value: i32, alpha0: i32, beta0: i32) -> NodeType {
    if value <= alpha0 {
        NodeType::UpperBound
    } else if value >= beta0 {
        NodeType::LowerBound
    } else {
        NodeType::Pv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::minimax::Minimax;
    use lgo_core::{Cell, Move};

    #[test]
    fn two_cell_board_is_a_draw() {
        let mut hooks = Minimax::new();
        let mut state = State::new(2);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(2), hooks.beta_init(2));
        let node = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert_eq!(node.minimax, 0);
    }

    #[test]
    fn quit_flag_stops_the_move_loop_early() {
        let mut hooks = Minimax::new();
        let mut state = State::new(3);
        let quit = AtomicBool::new(true);
        let (alpha, beta) = (hooks.alpha_init(3), hooks.beta_init(3));
        let node = search(&mut hooks, &mut state, alpha, beta, &quit);
        // No move was ever played, so the default node's best_move is None.
        assert_eq!(node.best_move, None);
    }

    #[test]
    fn best_move_is_set_even_without_a_pv_chain() {
        // Plain Minimax (unwrapped by Pv) tracks the best move at each ply
        // but doesn't retain a full principal-variation chain.
        let mut hooks = Minimax::new();
        let mut state = State::new(1);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(1), hooks.beta_init(1));
        let node = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert_eq!(node.best_move, Some(Move::play(Cell::Black, 0)));
        assert!(node.child.is_none());
    }
}
