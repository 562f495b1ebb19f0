//! Alpha-beta search for Linear Go: a flat, compile-time-composed stack of
//! policy hooks wrapping a generic recursive engine.

pub mod error;
pub mod search;

pub use error::Error;
pub use search::control::SearchControl;
pub use search::{SearchOutcome, Searcher, SearcherConfig};
