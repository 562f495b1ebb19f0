//! Engine-level errors — conditions recoverable at this crate's public
//! boundary. Everything reached only after that boundary is validated
//! remains `assert!`/`debug_assert!`, same as `lgo_core`'s own contract.

/// Errors returned from [`crate::Searcher::run`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The search window handed to [`crate::Searcher::run`] was inverted.
    /// Every outer-loop driver assumes `alpha <= beta`; called with the
    /// bounds swapped, MTD(f)'s `lower < upper` loop exits immediately and
    /// hands back a default, never-searched node instead of panicking, so
    /// this is caught explicitly rather than left as a silent wrong answer.
    #[error("invalid search window: alpha ({alpha}) > beta ({beta})")]
    InvalidWindow { alpha: i32, beta: i32 },
}
