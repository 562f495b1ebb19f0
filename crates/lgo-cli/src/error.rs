//! Driver-level errors — the user-visible boundary around a core that is
//! total on legal input. Everything the core itself can fail on is a
//! fatal assertion; the one real error class a user can actually trigger
//! from outside lives here.

/// Errors surfaced by the solver driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// `alpha > beta`, whether supplied directly or implied by a `g` guess
    /// overriding them to `[g-1, g+1]`.
    #[error("invalid search bounds: alpha ({alpha}) > beta ({beta})")]
    InvalidBounds { alpha: i32, beta: i32 },

    /// A move token in a `r` command or a startup move-prefix couldn't be
    /// parsed.
    #[error("invalid move {token:?}: {source}")]
    InvalidMove {
        token: String,
        #[source]
        source: lgo_core::ParseMoveError,
    },

    /// A `r` command replayed a move the live `State` rejects — not legal,
    /// not on an empty cell, or a superko repetition.
    #[error("illegal move {mv} from the current position")]
    IllegalMove { mv: lgo_core::Move },

    /// An unrecognized REPL line.
    #[error("unrecognized command: {line:?}")]
    UnknownCommand { line: String },
}
