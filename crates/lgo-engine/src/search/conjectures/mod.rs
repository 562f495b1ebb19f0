//! LGO-specific pruning conjectures, each a policy layer that intercepts
//! `init_node` to recognize a class of already-decided positions.

pub mod full;
pub mod stability;
pub mod telomere;

pub use full::Full;
pub use stability::Stability;
pub use telomere::Telomere;
