//! The search node value, unified across every policy layer.
//!
//! A per-layer subclass hierarchy would grow a new `Node` type at each
//! wrapping layer, each adding fields the layer above needs. Composing
//! policies at compile time in Rust doesn't need that: one flat record
//! carries every field any layer might want, and a layer that doesn't
//! care about a field just leaves it alone.

use lgo_core::Move;

/// Fail-soft classification of a completed search node, relative to the
/// window it was entered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Not yet classified (only seen on a `Node` under construction).
    Nil,
    /// The value is exact: some move value landed strictly inside the
    /// entry window.
    Pv,
    /// The value is a lower bound: the search failed high against beta.
    LowerBound,
    /// The value is an upper bound: the search failed low against alpha.
    UpperBound,
}

impl Default for NodeType {
    fn default() -> Self {
        NodeType::Nil
    }
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub node_type: NodeType,
    /// `true` once this node's value is known exactly rather than merely
    /// bounded.
    pub exact: bool,
    /// Black-referenced score: positive favors Black, negative favors White.
    pub minimax: i32,
    /// The move that produced `child`, i.e. this node's principal variation
    /// head.
    pub best_move: Option<Move>,
    /// The move that led from the parent to this node. Set by the caller
    /// when it attaches this node as a parent's `child`, not by the node
    /// itself.
    pub mv: Option<Move>,
    /// Principal-variation tail, when one has been attached.
    pub child: Option<Box<Node>>,
}

impl Node {
    /// Reconstructs the principal variation from this node down, following
    /// `child` links only.
    ///
    /// `best_move` and `child` can disagree: a later sibling can become the
    /// new `best_move` by failing low against this node's own window
    /// without qualifying as a strictly-inside-window PV tail (see the `Pv`
    /// layer), leaving the stale `child` behind. Walking `child` instead of
    /// `best_move` means the reconstructed line is always internally
    /// consistent, at the cost of sometimes being shorter than the full
    /// search — it simply stops where the PV stopped being provably exact.
    pub fn pv_line(&self) -> Vec<Move> {
        let mut line = Vec::new();
        let mut node = self;
        while let Some(child) = &node.child {
            if let Some(mv) = child.mv {
                line.push(mv);
            }
            node = child;
        }
        line
    }
}
