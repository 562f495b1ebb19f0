//! Error types surfaced at crate boundaries. Internal invariant violations
//! (illegal move, superko, depth overflow) are fatal assertions, not
//! recoverable errors — see `State::play` and `ZobristTable::word`.

use thiserror::Error;

/// Errors parsing the external move notation (`{color}{position}`, §6).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("invalid move color in \"{found}\" (expected b/B/w/W)")]
    InvalidColor { found: String },
    #[error("invalid move position in \"{found}\"")]
    InvalidPosition { found: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ParseMoveError::InvalidColor { found: "x3".into() };
        assert_eq!(err.to_string(), "invalid move color in \"x3\" (expected b/B/w/W)");
    }
}
