//! Solver REPL command parsing — the `r`/`h`/`i` protocol.

use lgo_core::Move;

use crate::error::DriverError;

/// A parsed REPL line.
#[derive(Debug, Clone)]
pub enum Command {
    /// `r <move1> <move2> …` — start a search from the root with this move
    /// prefix applied.
    Run(Vec<Move>),
    /// `h` — set the cooperative quit flag.
    Halt,
    /// `i` — print nodes searched and the current best value.
    Inspect,
}

/// Parses one line of REPL input.
pub fn parse_command(line: &str) -> Result<Command, DriverError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.first() {
        Some(&"r") => {
            let moves = tokens[1..]
                .iter()
                .map(|tok| {
                    tok.parse::<Move>().map_err(|source| DriverError::InvalidMove {
                        token: tok.to_string(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::Run(moves))
        }
        Some(&"h") => Ok(Command::Halt),
        Some(&"i") => Ok(Command::Inspect),
        _ => Err(DriverError::UnknownCommand { line: line.to_string() }),
    }
}
