//! The search engine and the driver built on top of it.
//!
//! [`engine::search`] is the one recursive function; everything else in
//! this module is a [`hooks::PolicyHooks`] layer stacked around it, plus
//! [`Searcher`], the iterative-deepening/MTD(f) driver that repeatedly
//! re-invokes the engine with a tightening depth cutoff until an exact
//! result comes back.

pub mod conjectures;
pub mod control;
pub mod depth_cutoff;
pub mod engine;
pub mod good_player;
pub mod hooks;
pub mod metrics;
pub mod minimax;
pub mod node;
pub mod pv;
pub mod tree;
pub mod tt;

use std::sync::atomic::{AtomicBool, Ordering};

use lgo_core::{Move, State};

use conjectures::{Full, Stability, Telomere};
use depth_cutoff::DepthCutoff;
use hooks::PolicyHooks;
use metrics::Metrics;
use minimax::Minimax;
use node::Node;
use pv::Pv;
use tree::NewickTree;
use tt::Tt;

use crate::error::Error;

/// Knobs a driver picks once, at construction, rather than per search.
#[derive(Debug, Clone, Copy)]
pub struct SearcherConfig {
    /// Transposition table capacity, rounded up to a power of two.
    pub tt_capacity: usize,
    /// Telomere is disabled by default (see `conjectures::telomere`).
    pub telomere_enabled: bool,
    /// `true` selects the MTD(f) outer loop; `false` selects the simpler
    /// single-wide-window-per-cutoff driver. Both reach the same exact
    /// result; MTD(f) usually gets there with fewer total nodes.
    pub use_mtdf: bool,
    /// Nesting depth the Newick-ish tree-emission layer expands to.
    /// `None` disables it entirely (the default).
    pub tree_emit_depth: Option<u32>,
}

impl Default for SearcherConfig {
    fn default() -> SearcherConfig {
        SearcherConfig {
            tt_capacity: 1 << 16,
            telomere_enabled: false,
            use_mtdf: true,
            tree_emit_depth: None,
        }
    }
}

/// The result of one completed outer iteration (a full cutoff depth for
/// the simple driver, or one MTD(f) convergence for the other).
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub minimax: i32,
    pub exact: bool,
    pub best_move: Option<Move>,
    pub pv: Vec<Move>,
    pub depth_cutoff: u32,
    pub nodes: u64,
    /// This iteration's rendered tree, when `tree_emit_depth` is set.
    pub tree: Option<String>,
}

impl SearchOutcome {
    fn from_node(node: &Node, depth_cutoff: u32, nodes: u64, tree: Option<String>) -> SearchOutcome {
        SearchOutcome {
            minimax: node.minimax,
            exact: node.exact,
            best_move: node.best_move,
            pv: node.pv_line(),
            depth_cutoff,
            nodes,
            tree,
        }
    }
}

type Stack = NewickTree<Metrics<Tt<Pv<DepthCutoff<Full<Stability<Telomere<Minimax>>>>>>>>>;

/// Owns the policy stack and the outer iterative-deepening/MTD(f) loop.
/// One `Searcher` holds one transposition table, whose lifetime spans
/// every iteration of a single [`Searcher::run`] call; call
/// [`Searcher::clear_tt`] between unrelated searches (a `r` command that
/// doesn't extend the previous one).
pub struct Searcher {
    stack: Stack,
    config: SearcherConfig,
}

impl Searcher {
    pub fn new(config: SearcherConfig) -> Searcher {
        let stack = Telomere::new(Minimax::new(), config.telomere_enabled);
        let stack = Stability::new(stack);
        let stack = Full::new(stack);
        let stack = DepthCutoff::new(stack, 1);
        let stack = Pv::new(stack);
        let stack = Tt::new(stack, config.tt_capacity);
        let stack = Metrics::new(stack);
        let stack = NewickTree::new(stack, config.tree_emit_depth);
        Searcher { stack, config }
    }

    pub fn clear_tt(&mut self) {
        self.stack.inner_mut().inner_mut().clear_table();
    }

    /// Takes the tree rendered by the most recently completed outer
    /// iteration, if `tree_emit_depth` is set. `None` either because
    /// emission is disabled or because nothing has completed since the
    /// last call.
    pub fn take_tree(&mut self) -> Option<String> {
        self.stack.take_tree()
    }

    fn depth_cutoff_mut(&mut self) -> &mut DepthCutoff<Full<Stability<Telomere<Minimax>>>> {
        self.stack.inner_mut().inner_mut().inner_mut().inner_mut()
    }

    /// Runs the configured outer loop from the root `state` within
    /// `(alpha, beta)`, calling `on_iteration` once per completed outer
    /// iteration. `on_iteration` runs on the calling thread — a driver that
    /// wants to surface progress asynchronously is responsible for hopping
    /// threads itself; this function never spawns one.
    ///
    /// Returns [`Error::InvalidWindow`] without searching at all if
    /// `alpha > beta`.
    pub fn run(
        &mut self,
        state: &mut State,
        alpha: i32,
        beta: i32,
        quit: &AtomicBool,
        on_iteration: impl FnMut(&SearchOutcome),
    ) -> Result<SearchOutcome, Error> {
        if alpha > beta {
            return Err(Error::InvalidWindow { alpha, beta });
        }
        Ok(if self.config.use_mtdf {
            self.run_mtdf(state, alpha, beta, quit, on_iteration)
        } else {
            self.run_simple(state, alpha, beta, quit, on_iteration)
        })
    }

    /// The simpler driver: one full-window search per cutoff, looping
    /// until the result is exact or `quit` fires.
    fn run_simple(
        &mut self,
        state: &mut State,
        alpha: i32,
        beta: i32,
        quit: &AtomicBool,
        mut on_iteration: impl FnMut(&SearchOutcome),
    ) -> SearchOutcome {
        let max_cutoff = state.size() as u32 + 2;
        let mut cutoff = 1u32;
        loop {
            self.depth_cutoff_mut().set_cutoff(cutoff);
            let node = engine::search(&mut self.stack, state, alpha, beta, quit);
            let tree = self.stack.take_tree();
            let outcome = SearchOutcome::from_node(&node, cutoff, self.stack.inner_mut().nodes(), tree);
            tracing::debug!(cutoff, minimax = outcome.minimax, exact = outcome.exact, nodes = outcome.nodes, "simple driver iteration complete");
            on_iteration(&outcome);
            if node.exact || quit.load(Ordering::Relaxed) || cutoff >= max_cutoff {
                return outcome;
            }
            cutoff += 2;
        }
    }

    /// MTD(f): for each cutoff, repeatedly probes with a null window around
    /// the running guess `f`, tightening `lower`/`upper` until they meet,
    /// per Plaat's memory-enhanced test algorithm. A prior iteration's
    /// final value seeds the next cutoff's first guess.
    fn run_mtdf(
        &mut self,
        state: &mut State,
        alpha: i32,
        beta: i32,
        quit: &AtomicBool,
        mut on_iteration: impl FnMut(&SearchOutcome),
    ) -> SearchOutcome {
        let max_cutoff = state.size() as u32 + 2;
        let mut cutoff = 1u32;
        let mut f = clamp_guess(0, alpha, beta);

        loop {
            self.depth_cutoff_mut().set_cutoff(cutoff);

            let mut lower = alpha;
            let mut upper = beta;
            let mut all_exact = true;
            let mut node = Node::default();
            let mut probes = 0u32;
            let probe_limit = (beta - alpha) as u32 + 4;

            while lower < upper && !quit.load(Ordering::Relaxed) {
                probes += 1;
                if probes > probe_limit {
                    break;
                }
                let bound = if f == lower { f + 1 } else { f };
                node = engine::search(&mut self.stack, state, bound - 1, bound, quit);
                all_exact &= node.exact;
                f = node.minimax;
                if node.minimax < bound {
                    upper = node.minimax;
                } else {
                    lower = node.minimax;
                }
            }

            let tree = self.stack.take_tree();
            let outcome = SearchOutcome::from_node(&node, cutoff, self.stack.inner_mut().nodes(), tree);
            tracing::debug!(cutoff, f, minimax = outcome.minimax, all_exact, nodes = outcome.nodes, "mtd(f) iteration complete");
            on_iteration(&outcome);
            if all_exact || quit.load(Ordering::Relaxed) || cutoff >= max_cutoff {
                return outcome;
            }
            cutoff += 2;
        }
    }
}

fn clamp_guess(guess: i32, alpha: i32, beta: i32) -> i32 {
    if beta > alpha + 1 {
        guess.clamp(alpha + 1, beta - 1)
    } else {
        guess.clamp(alpha, beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgo_core::Cell;

    #[test]
    fn simple_driver_solves_a_one_cell_board() {
        let mut searcher = Searcher::new(SearcherConfig { use_mtdf: false, ..SearcherConfig::default() });
        let mut state = State::new(1);
        let quit = AtomicBool::new(false);
        let outcome = searcher.run(&mut state, -2, 2, &quit, |_| {}).unwrap();
        assert_eq!(outcome.minimax, 1);
        assert!(outcome.exact);
        assert_eq!(outcome.best_move, Some(Move::play(Cell::Black, 0)));
    }

    #[test]
    fn mtdf_driver_solves_a_one_cell_board() {
        let mut searcher = Searcher::new(SearcherConfig::default());
        let mut state = State::new(1);
        let quit = AtomicBool::new(false);
        let outcome = searcher.run(&mut state, -2, 2, &quit, |_| {}).unwrap();
        assert_eq!(outcome.minimax, 1);
        assert!(outcome.exact);
    }

    #[test]
    fn both_drivers_agree_on_a_two_cell_board() {
        let quit = AtomicBool::new(false);

        let mut simple = Searcher::new(SearcherConfig { use_mtdf: false, ..SearcherConfig::default() });
        let mut state = State::new(2);
        let simple_outcome = simple.run(&mut state, -3, 3, &quit, |_| {}).unwrap();

        let mut mtdf = Searcher::new(SearcherConfig::default());
        let mut state = State::new(2);
        let mtdf_outcome = mtdf.run(&mut state, -3, 3, &quit, |_| {}).unwrap();

        assert_eq!(simple_outcome.minimax, mtdf_outcome.minimax);
        assert!(simple_outcome.exact);
        assert!(mtdf_outcome.exact);
    }

    #[test]
    fn iteration_callback_fires_at_least_once() {
        let mut searcher = Searcher::new(SearcherConfig::default());
        let mut state = State::new(1);
        let quit = AtomicBool::new(false);
        let mut iterations = 0;
        searcher.run(&mut state, -2, 2, &quit, |_| iterations += 1).unwrap();
        assert!(iterations >= 1);
    }

    #[test]
    fn quit_set_before_running_still_returns_a_well_formed_outcome() {
        let mut searcher = Searcher::new(SearcherConfig::default());
        let mut state = State::new(3);
        let quit = AtomicBool::new(true);
        let outcome = searcher.run(&mut state, -4, 4, &quit, |_| {}).unwrap();
        assert_eq!(outcome.best_move, None);
    }

    #[test]
    fn clear_tt_does_not_change_a_subsequent_result() {
        let mut searcher = Searcher::new(SearcherConfig::default());
        let mut state = State::new(2);
        let quit = AtomicBool::new(false);
        let first = searcher.run(&mut state, -3, 3, &quit, |_| {}).unwrap();
        searcher.clear_tt();
        let second = searcher.run(&mut state, -3, 3, &quit, |_| {}).unwrap();
        assert_eq!(first.minimax, second.minimax);
    }

    #[test]
    fn inverted_window_is_rejected_before_searching() {
        let mut searcher = Searcher::new(SearcherConfig::default());
        let mut state = State::new(3);
        let quit = AtomicBool::new(false);
        let err = searcher.run(&mut state, 4, -4, &quit, |_| {}).unwrap_err();
        assert!(matches!(err, Error::InvalidWindow { alpha: 4, beta: -4 }));
    }
}
