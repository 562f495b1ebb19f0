//! Zobrist hashing for LGO positions, keyed by `(depth, position, color)`.
//!
//! Unlike a conventional (piece, square) Zobrist table, each word also
//! depends on search depth — see §9's design note: this makes two equal
//! positions reached at different depths hash differently, which is
//! acceptable only because the transposition table compares full state on
//! lookup, never hash alone.

use std::sync::OnceLock;

use rand::Rng;

use crate::board::MAX_SIZE;
use crate::cell::Cell;

/// Depths beyond this are a configuration error, not a position a real
/// search should reach (N ≤ 16 boards don't need anywhere near this many
/// plies of iterative deepening).
pub const MAX_DEPTH: usize = 256;

/// One column's width: pass (index 0) plus one slot per board position.
const POSITIONS: usize = MAX_SIZE as usize + 1;

pub struct ZobristTable {
    words: Box<[[[u64; POSITIONS]; 2]; MAX_DEPTH]>,
}

static TABLE: OnceLock<ZobristTable> = OnceLock::new();

impl ZobristTable {
    /// The process-wide table, lazily populated on first use with a random
    /// seed (§5: "initialized lazily on first use with a random seed").
    pub fn get() -> &'static ZobristTable {
        TABLE.get_or_init(ZobristTable::new_random)
    }

    fn new_random() -> ZobristTable {
        let mut rng = rand::thread_rng();
        let mut words = Box::new([[[0u64; POSITIONS]; 2]; MAX_DEPTH]);
        for depth_words in words.iter_mut() {
            for color_words in depth_words.iter_mut() {
                for word in color_words.iter_mut() {
                    *word = rng.gen();
                }
            }
        }
        ZobristTable { words }
    }

    /// The word XORed into the running hash for `color` playing `position`
    /// (or passing, if `position` is `None`) at `depth`.
    pub fn word(&self, depth: usize, color: Cell, position: Option<u8>) -> u64 {
        assert!(depth < MAX_DEPTH, "zobrist depth overflow: {depth} >= {MAX_DEPTH}");
        let slot = match position {
            None => 0,
            Some(pos) => pos as usize + 1,
        };
        self.words[depth][color.index()][slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_deterministic_within_a_process() {
        let table = ZobristTable::get();
        assert_eq!(table.word(0, Cell::Black, Some(2)), table.word(0, Cell::Black, Some(2)));
    }

    #[test]
    fn different_coordinates_differ() {
        let table = ZobristTable::get();
        let a = table.word(0, Cell::Black, Some(2));
        let b = table.word(0, Cell::Black, Some(3));
        let c = table.word(1, Cell::Black, Some(2));
        let d = table.word(0, Cell::White, Some(2));
        let pass = table.word(0, Cell::Black, None);
        let mut all = vec![a, b, c, d, pass];
        let count = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), count, "zobrist words should not collide in this small sample");
    }

    #[test]
    #[should_panic(expected = "zobrist depth overflow")]
    fn depth_overflow_panics() {
        let table = ZobristTable::get();
        table.word(MAX_DEPTH, Cell::Black, Some(0));
    }
}
