//! Game state: board + history + pass-tracking + incremental Zobrist hash,
//! with memoized per-color legality.

use tracing::{debug, trace};

use crate::board::Board;
use crate::cell::Cell;
use crate::history::History;
use crate::mv::Move;
use crate::zobrist::ZobristTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Normal,
    Pass,
    GameOver,
}

/// Memoized legality info for one color, valid between `play`/`undo`
/// boundaries.
#[derive(Debug, Clone, Copy)]
pub struct MoveInfo {
    pub legal_mask: u32,
    pub capturing_mask: u32,
}

#[derive(Clone)]
struct UndoRecord {
    game_state: GameState,
    board: Board,
    mv: Move,
    prev_hash: u64,
}

#[derive(Clone)]
pub struct State {
    pub board: Board,
    pub history: History,
    pub side_to_play: Cell,
    pub game_state: GameState,
    pub hash: u64,
    undo_stack: Vec<UndoRecord>,
    info_cache: [Option<MoveInfo>; 2],
}

impl State {
    pub fn new(size: u8) -> State {
        State {
            board: Board::new(size),
            history: History::new(size),
            side_to_play: Cell::Black,
            game_state: GameState::Normal,
            hash: 0,
            undo_stack: Vec::new(),
            info_cache: [None, None],
        }
    }

    pub fn size(&self) -> u8 {
        self.board.size()
    }

    /// Number of moves played so far (the recursion depth a fresh search
    /// starting from this state would be at).
    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn terminal(&self) -> bool {
        matches!(self.game_state, GameState::GameOver)
    }

    fn info(&mut self, color: Cell) -> MoveInfo {
        if let Some(info) = self.info_cache[color.index()] {
            return info;
        }
        let info = self.compute_info(color);
        self.info_cache[color.index()] = Some(info);
        info
    }

    fn compute_info(&self, color: Cell) -> MoveInfo {
        let mut legal = self.board.empty_set();
        let mut capturing = 0u32;
        for i in 0..self.board.size() {
            if legal & (1 << i) == 0 {
                continue;
            }
            let mut b = self.board;
            b.set(i, color);
            let detail = b.clear_captured_detailed(i);
            if self.history.contains(&b) || b.get(i) == Cell::Empty {
                legal &= !(1 << i);
                continue;
            }
            if detail.captured_opponent() {
                capturing |= 1 << i;
            }
        }
        MoveInfo {
            legal_mask: legal,
            capturing_mask: capturing,
        }
    }

    pub fn legal_moves(&mut self, color: Cell) -> u32 {
        self.info(color).legal_mask
    }

    pub fn capturing_moves(&mut self, color: Cell) -> u32 {
        self.info(color).capturing_mask
    }

    /// Plays `mv`. Asserts the move is legal — the core is total on legal
    /// input (§7); callers at an external boundary must validate first.
    pub fn play(&mut self, mv: Move) {
        assert!(!self.terminal(), "play called on a finished game");
        trace!(%mv, depth = self.depth(), "playing move");
        let depth = self.depth();
        let prev_game_state = self.game_state;
        let prev_board = self.board;
        let prev_hash = self.hash;

        if mv.is_pass {
            self.game_state = match self.game_state {
                GameState::Normal => GameState::Pass,
                GameState::Pass => GameState::GameOver,
                GameState::GameOver => unreachable!("checked above"),
            };
            if self.game_state == GameState::GameOver {
                debug!(board = %self.board, minimax = self.board.minimax(), "game over: two consecutive passes");
            }
        } else {
            let legal = self.legal_moves(mv.color);
            assert!(
                legal & (1 << mv.position) != 0,
                "illegal move: {mv} is not legal for the side to play"
            );
            assert!(
                self.board.get(mv.position) == Cell::Empty,
                "illegal move: {mv} targets a non-empty cell"
            );
            self.board.set(mv.position, mv.color);
            let captures = self.board.clear_captured(mv.position);
            if captures > 0 {
                debug!(%mv, captures, "move captured a chain");
            }
            assert!(
                !self.history.contains(&self.board),
                "illegal move: {mv} recreates a previous board (superko)"
            );
            self.history.add(&self.board);
            self.game_state = GameState::Normal;
        }

        let position = if mv.is_pass { None } else { Some(mv.position) };
        self.hash ^= ZobristTable::get().word(depth, mv.color, position);
        self.undo_stack.push(UndoRecord {
            game_state: prev_game_state,
            board: prev_board,
            mv,
            prev_hash,
        });
        self.side_to_play = mv.color.flip();
        self.info_cache = [None, None];
    }

    /// Restores the state to immediately before the last `play`.
    pub fn undo(&mut self) {
        let rec = self.undo_stack.pop().expect("undo called with empty history");
        trace!(mv = %rec.mv, depth = self.undo_stack.len(), "undoing move");
        if rec.board != self.board {
            self.history.remove(&self.board);
        }
        self.game_state = rec.game_state;
        self.board = rec.board;
        self.hash = rec.prev_hash;
        self.side_to_play = rec.mv.color;
        self.info_cache = [None, None];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_pass_terminates() {
        let mut s = State::new(3);
        assert!(!s.terminal());
        s.play(Move::pass(Cell::Black));
        assert!(!s.terminal());
        s.play(Move::pass(Cell::White));
        assert!(s.terminal());
    }

    #[test]
    fn undo_restores_board_history_hash_and_state() {
        let mut s = State::new(4);
        let board_before = s.board;
        let hash_before = s.hash;
        let history_before = s.history.contains(&board_before);

        s.play(Move::play(Cell::Black, 1));
        assert_ne!(s.board, board_before);
        s.undo();

        assert_eq!(s.board, board_before);
        assert_eq!(s.hash, hash_before);
        assert_eq!(s.history.contains(&board_before), history_before);
        assert_eq!(s.game_state, GameState::Normal);
        assert_eq!(s.side_to_play, Cell::Black);
    }

    #[test]
    fn superko_forbids_recreating_history() {
        // N=2: Black plays 1, White recaptures at 0. Black replaying 1
        // would recreate the single-stone-at-1 board already in history.
        let mut s = State::new(2);
        s.play(Move::play(Cell::Black, 1));
        s.play(Move::play(Cell::White, 0));
        assert_eq!(s.board.get(1), Cell::Empty, "white captures black's lone stone");
        assert_eq!(s.legal_moves(Cell::Black), 0, "replaying 1 would recreate history");
    }

    #[test]
    fn legality_table_n2() {
        // S8 from §8.
        let mut s = State::new(2);
        assert_eq!(s.legal_moves(Cell::Black), 0b11);
        assert_eq!(s.legal_moves(Cell::White), 0b11);
        s.play(Move::play(Cell::Black, 1));
        assert_eq!(s.legal_moves(Cell::Black), 0b00);
        assert_eq!(s.legal_moves(Cell::White), 0b01);
        s.play(Move::play(Cell::White, 0));
        assert_eq!(s.board.get(1), Cell::Empty, "white captures black's lone stone");
        assert_eq!(s.legal_moves(Cell::Black), 0b00);
        assert_eq!(s.legal_moves(Cell::White), 0b00);
    }

    #[test]
    fn sequential_captures_leave_no_legal_black_reply() {
        // N=5: B _ B _ B, then White tucks in at 3 (captured back out
        // immediately by Black's reply at 4), then White plays 1, capturing
        // Black's lone stone at 0. Black has no legal move left: replaying 0
        // recreates an earlier history entry (superko) and replaying 3
        // recaptures into its own now-empty chain (suicide).
        let mut s = State::new(5);
        s.play(Move::play(Cell::Black, 0));
        s.play(Move::play(Cell::Black, 2));
        s.play(Move::play(Cell::White, 3));
        s.play(Move::play(Cell::Black, 4));
        s.play(Move::play(Cell::White, 1));
        assert_eq!(s.board.get(0), Cell::Empty, "black's stone at 0 is captured");
        assert_eq!(s.board.get(1), Cell::White);
        assert_eq!(s.board.get(2), Cell::Black, "black's stone at 2 keeps a liberty at 3");
        assert_eq!(s.board.get(4), Cell::Black);
        assert_eq!(s.legal_moves(Cell::Black), 0);
    }
}
