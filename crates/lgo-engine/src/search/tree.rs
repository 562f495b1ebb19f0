//! The Newick-ish tree-emission layer (spec §6): an optional outermost
//! layer that buffers a nested-parenthesised rendering of the search tree
//! in memory and hands back the completed root string once per top-level
//! call, annotated with per-node `[&key=value;...]` comments.
//!
//! Disabled by default (`max_depth: None`), following the same
//! always-present-but-internally-gated shape as
//! [`crate::search::conjectures::telomere::Telomere`] rather than a
//! separate feature-flagged type, so the policy stack's type stays fixed
//! regardless of whether a caller wants tree output.

use lgo_core::{Cell, Move, State};

use crate::search::hooks::{PolicyHooks, WindowSnapshot};
use crate::search::node::{Node, NodeType};

struct Frame {
    alpha0: i32,
    beta0: i32,
    depth: u32,
    to_play: Cell,
    children: Vec<String>,
    subtree_size: u64,
    max_depth_reached: u32,
}

/// One already-rendered subtree, handed from a popped child frame up into
/// its parent's frame via [`NewickTree::last_child`].
struct Rendered {
    text: String,
    subtree_size: u64,
    max_depth_reached: u32,
}

pub struct NewickTree<Inner> {
    inner: Inner,
    max_depth: Option<u32>,
    frames: Vec<Frame>,
    last_child: Option<Rendered>,
    /// The most recently completed root-level rendering, taken by the
    /// driver once per outer iteration via [`NewickTree::take_tree`].
    latest: Option<String>,
}

impl<Inner> NewickTree<Inner> {
    pub fn new(inner: Inner, max_depth: Option<u32>) -> NewickTree<Inner> {
        NewickTree {
            inner,
            max_depth,
            frames: Vec::new(),
            last_child: None,
            latest: None,
        }
    }

    pub fn inner_mut(&mut self) -> &mut Inner {
        &mut self.inner
    }

    /// Takes the tree rendered by the most recently completed top-level
    /// call, if tree emission is enabled and a search has completed since
    /// the last call. Buffers in memory only; writing it anywhere is the
    /// driver's job.
    pub fn take_tree(&mut self) -> Option<String> {
        self.latest.take()
    }
}

fn node_type_label(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Nil => "nil",
        NodeType::Pv => "pv",
        NodeType::LowerBound => "lower",
        NodeType::UpperBound => "upper",
    }
}

fn move_label(mv: Move) -> String {
    mv.to_string().replace(' ', "_")
}

fn render(frame: Frame, node: &Node) -> Rendered {
    let (alpha_after, beta_after) = match frame.to_play {
        Cell::Black => (node.minimax.max(frame.alpha0), frame.beta0),
        Cell::White => (frame.alpha0, node.minimax.min(frame.beta0)),
        Cell::Empty => (frame.alpha0, frame.beta0),
    };
    let annotation = format!(
        "[&minimax={};type={};exact={};alpha={}->{};beta={}->{};size={};maxdepth={};to_play={}]",
        node.minimax,
        node_type_label(node.node_type),
        node.exact,
        frame.alpha0,
        alpha_after,
        frame.beta0,
        beta_after,
        frame.subtree_size,
        frame.max_depth_reached,
        frame.to_play,
    );
    let text = if frame.children.is_empty() {
        annotation
    } else {
        format!("({}){}", frame.children.join(","), annotation)
    };
    Rendered {
        text,
        subtree_size: frame.subtree_size,
        max_depth_reached: frame.max_depth_reached,
    }
}

impl<Inner: PolicyHooks> PolicyHooks for NewickTree<Inner> {
    fn alpha_init(&self, size: u8) -> i32 {
        self.inner.alpha_init(size)
    }

    fn beta_init(&self, size: u8) -> i32 {
        self.inner.beta_init(size)
    }

    fn init_node(&mut self, state: &mut State, alpha: i32, beta: i32) -> Option<Node> {
        if self.max_depth.is_some() {
            let depth = state.depth() as u32;
            self.frames.push(Frame {
                alpha0: alpha,
                beta0: beta,
                depth,
                to_play: state.side_to_play,
                children: Vec::new(),
                subtree_size: 1,
                max_depth_reached: depth,
            });
        }
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
        self.inner.update(parent, child, mv, to_play, alpha, beta, window);
        if self.max_depth.is_none() {
            return;
        }
        let Some(rendered) = self.last_child.take() else {
            return;
        };
        if let Some(frame) = self.frames.last_mut() {
            frame.subtree_size += rendered.subtree_size;
            frame.max_depth_reached = frame.max_depth_reached.max(rendered.max_depth_reached);
            let max_depth = self.max_depth.expect("checked above");
            if frame.depth < max_depth {
                frame.children.push(format!("{}{}", move_label(mv), rendered.text));
            }
        }
    }

    fn on_exit(&mut self, state: &mut State, node: &mut Node) {
        self.inner.on_exit(state, node);
        if self.max_depth.is_none() {
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let is_root = self.frames.is_empty();
        let rendered = render(frame, node);
        if is_root {
            self.latest = Some(rendered.text.clone());
        }
        self.last_child = Some(rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::engine::search;
    use crate::search::minimax::Minimax;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn disabled_layer_never_produces_a_tree() {
        let mut hooks = NewickTree::new(Minimax::new(), None);
        let mut state = State::new(2);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(2), hooks.beta_init(2));
        let _ = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert_eq!(hooks.take_tree(), None);
    }

    #[test]
    fn enabled_layer_renders_an_annotated_root() {
        let mut hooks = NewickTree::new(Minimax::new(), Some(8));
        let mut state = State::new(1);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(1), hooks.beta_init(1));
        let node = search(&mut hooks, &mut state, alpha, beta, &quit);
        let tree = hooks.take_tree().expect("enabled layer always renders a root");
        assert!(tree.contains(&format!("minimax={}", node.minimax)));
        assert!(tree.contains("to_play=B"));
        assert!(tree.starts_with('('), "a one-cell board's root has at least one child move");
    }

    #[test]
    fn take_tree_drains_the_buffer() {
        let mut hooks = NewickTree::new(Minimax::new(), Some(8));
        let mut state = State::new(1);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(1), hooks.beta_init(1));
        let _ = search(&mut hooks, &mut state, alpha, beta, &quit);
        assert!(hooks.take_tree().is_some());
        assert!(hooks.take_tree().is_none());
    }

    #[test]
    fn depth_cutoff_collapses_nested_parens() {
        let mut hooks = NewickTree::new(Minimax::new(), Some(0));
        let mut state = State::new(2);
        let quit = AtomicBool::new(false);
        let (alpha, beta) = (hooks.alpha_init(2), hooks.beta_init(2));
        let _ = search(&mut hooks, &mut state, alpha, beta, &quit);
        let tree = hooks.take_tree().unwrap();
        assert!(tree.starts_with('['), "depth 0 forbids expanding the root's own children");
    }
}
