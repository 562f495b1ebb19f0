//! Moves: a stone placement, or a pass, by one color.

use std::fmt;
use std::str::FromStr;

use crate::cell::Cell;
use crate::error::ParseMoveError;

/// A single move by one color. `position` is 0-based and meaningless when
/// `is_pass` is set. `color` is the mover, not the side to play afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: Cell,
    pub position: u8,
    pub is_pass: bool,
}

impl Move {
    pub fn play(color: Cell, position: u8) -> Move {
        assert!(color.is_stone(), "a move must be played by Black or White");
        Move {
            color,
            position,
            is_pass: false,
        }
    }

    pub fn pass(color: Cell) -> Move {
        assert!(color.is_stone(), "a move must be played by Black or White");
        Move {
            color,
            position: 0,
            is_pass: true,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass {
            write!(f, "{} pass", self.color)
        } else {
            write!(f, "{}{}", self.color, self.position + 1)
        }
    }
}

/// Parses the external notation from §6: `{color}{position}` where color is
/// one of `b`, `B`, `w`, `W` and position is a 1-based integer, e.g. `"B3"`.
/// A bare color letter with no following digits parses as a pass.
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let color = match chars.next() {
            Some('b' | 'B') => Cell::Black,
            Some('w' | 'W') => Cell::White,
            _ => return Err(ParseMoveError::InvalidColor { found: s.to_string() }),
        };
        let rest = chars.as_str();
        if rest.is_empty() {
            return Ok(Move::pass(color));
        }
        let one_based: u32 = rest
            .parse()
            .map_err(|_| ParseMoveError::InvalidPosition { found: s.to_string() })?;
        if one_based == 0 {
            return Err(ParseMoveError::InvalidPosition { found: s.to_string() });
        }
        Ok(Move::play(color, (one_based - 1) as u8))
    }
}
