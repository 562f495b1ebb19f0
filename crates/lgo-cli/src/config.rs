//! Startup options: the board size, initial search window, an
//! optional MTD(f)-style guess that overrides the window, an optional move
//! prefix applied before the REPL starts accepting commands, and the
//! engine-level knobs ([`lgo_engine::SearcherConfig`]) a driver picks once.

use lgo_core::Move;
use lgo_engine::SearcherConfig;

use crate::error::DriverError;

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub size: u8,
    pub alpha: i32,
    pub beta: i32,
    pub moves: Vec<Move>,
    pub tt_capacity: usize,
    pub telomere_enabled: bool,
    pub use_mtdf: bool,
    /// Depth to which the tree-emission layer should nest parentheses
    /// before collapsing to a leaf annotation; `None` disables it.
    pub tree_emit_depth: Option<u32>,
}

impl SolverConfig {
    /// Builds a config from explicit alpha/beta, validating `alpha <= beta`.
    pub fn new(size: u8, alpha: i32, beta: i32) -> Result<SolverConfig, DriverError> {
        if alpha > beta {
            return Err(DriverError::InvalidBounds { alpha, beta });
        }
        Ok(SolverConfig {
            size,
            alpha,
            beta,
            moves: Vec::new(),
            ..SolverConfig::default_for_size(size)
        })
    }

    /// Builds a config from an MTD(f)-style guess `g`, which overrides
    /// alpha/beta to `[g-1, g+1]`.
    pub fn from_guess(size: u8, guess: i32) -> Result<SolverConfig, DriverError> {
        SolverConfig::new(size, guess - 1, guess + 1)
    }

    fn default_for_size(size: u8) -> SolverConfig {
        SolverConfig {
            size,
            alpha: -(size as i32 + 1),
            beta: size as i32 + 1,
            moves: Vec::new(),
            tt_capacity: 1 << 16,
            telomere_enabled: false,
            use_mtdf: true,
            tree_emit_depth: None,
        }
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> SolverConfig {
        self.moves = moves;
        self
    }

    pub fn searcher_config(&self) -> SearcherConfig {
        SearcherConfig {
            tt_capacity: self.tt_capacity,
            telomere_enabled: self.telomere_enabled,
            use_mtdf: self.use_mtdf,
            tree_emit_depth: self.tree_emit_depth,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig::default_for_size(9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_alpha_greater_than_beta() {
        assert!(matches!(
            SolverConfig::new(9, 5, 3),
            Err(DriverError::InvalidBounds { alpha: 5, beta: 3 })
        ));
    }

    #[test]
    fn guess_overrides_to_a_one_wide_window_around_it() {
        let config = SolverConfig::from_guess(9, 0).unwrap();
        assert_eq!((config.alpha, config.beta), (-1, 1));
    }
}
