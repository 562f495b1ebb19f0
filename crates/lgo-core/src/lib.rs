//! Core Linear Go types: board representation, state machine, and move rules.

mod board;
mod cell;
mod error;
mod history;
mod mv;
mod score;
mod state;
mod zobrist;

pub use board::{AnnotatedBoard, Board, CaptureDetail, CELL_WIDTH, MAX_SIZE};
pub use cell::Cell;
pub use error::ParseMoveError;
pub use history::History;
pub use mv::Move;
pub use score::Score;
pub use state::{GameState, MoveInfo, State};
pub use zobrist::{ZobristTable, MAX_DEPTH};
