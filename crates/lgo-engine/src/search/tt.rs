//! Transposition table: direct-mapped, full-state-equality keyed, with
//! subtree-work-based replacement.
//!
//! The Zobrist hash alone is not trusted to identify a position — it's
//! depth-dependent by construction (see `lgo_core::ZobristTable`) — so a
//! probe only returns a hit when the stored board and side to play match
//! the live state exactly, not just the hash. Replacement favors the entry
//! that cost more search effort to produce: a slot is only overwritten when
//! the incoming result did at least as much subtree work as what's already
//! there.

use lgo_core::{Board, Cell, Move, State};

use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::{Node, NodeType};

#[derive(Debug, Clone)]
struct TtEntry {
    hash: u64,
    board: Board,
    color: Cell,
    node_type: NodeType,
    exact: bool,
    minimax: i32,
    best_move: Option<Move>,
    work: u64,
}

pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    mask: u64,
}

impl TranspositionTable {
    /// `capacity` is rounded up to the next power of two.
    pub fn new(capacity: usize) -> TranspositionTable {
        let capacity = capacity.max(1).next_power_of_two();
        TranspositionTable {
            entries: vec![None; capacity],
            mask: (capacity - 1) as u64,
        }
    }

    fn index(&self, hash: u64) -> usize {
        (hash & self.mask) as usize
    }

    fn probe(&self, hash: u64, board: &Board, color: Cell) -> Option<&TtEntry> {
        match &self.entries[self.index(hash)] {
            Some(e) if e.hash == hash && e.board == *board && e.color == color => Some(e),
            _ => None,
        }
    }

    fn store(&mut self, hash: u64, board: Board, color: Cell, node: &Node, work: u64) {
        let idx = self.index(hash);
        let dominated = match &self.entries[idx] {
            None => true,
            Some(existing) => work >= existing.work,
        };
        if !dominated {
            return;
        }
        self.entries[idx] = Some(TtEntry {
            hash,
            board,
            color,
            node_type: node.node_type,
            exact: node.exact,
            minimax: node.minimax,
            best_move: node.best_move,
            work,
        });
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
    }
}

/// Wraps an inner policy with transposition-table lookups and stores.
pub struct Tt<Inner> {
    inner: Inner,
    table: TranspositionTable,
    nodes_visited: u64,
    enter_stack: Vec<u64>,
}

impl<Inner> Tt<Inner> {
    pub fn new(inner: Inner, capacity: usize) -> Tt<Inner> {
        Tt {
            inner,
            table: TranspositionTable::new(capacity),
            nodes_visited: 0,
            enter_stack: Vec::new(),
        }
    }

    pub fn clear_table(&mut self) {
        self.table.clear();
    }

    pub fn inner_mut(&mut self) -> &mut Inner {
        &mut self.inner
    }
}

impl<Inner: PolicyHooks> PolicyHooks for Tt<Inner> {
    fn alpha_init(&self, size: u8) -> i32 {
        self.inner.alpha_init(size)
    }

    fn beta_init(&self, size: u8) -> i32 {
        self.inner.beta_init(size)
    }

    fn init_node(&mut self, state: &mut State, alpha: i32, beta: i32) -> Option<Node> {
        self.nodes_visited += 1;
        if let Some(node) = self.inner.init_node(state, alpha, beta) {
            return Some(node);
        }

        let hit = self.table.probe(state.hash, &state.board, state.side_to_play)?;
        let cutoff = match hit.node_type {
            NodeType::Pv => true,
            NodeType::LowerBound => hit.minimax >= beta,
            NodeType::UpperBound => hit.minimax <= alpha,
            NodeType::Nil => false,
        };
        if !cutoff {
            return None;
        }
        Some(Node {
            node_type: hit.node_type,
            exact: hit.exact,
            minimax: hit.minimax,
            best_move: hit.best_move,
            mv: None,
            child: None,
        })
    }

    fn on_enter(&mut self, state: &mut State, alpha: i32, beta: i32) {
        self.enter_stack.push(self.nodes_visited);
        self.inner.on_enter(state, alpha, beta);
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
        self.inner.on_exit(state, node);
        let started_at = self.enter_stack.pop().unwrap_or(self.nodes_visited);
        let work = self.nodes_visited - started_at;
        self.table.store(state.hash, state.board, state.side_to_play, node, work);
    }
}
