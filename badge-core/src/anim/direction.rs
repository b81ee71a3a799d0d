//! Swipe directions and the per-step shift

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rightmost column of every row
const H_MASK: u64 = 0x0101_0101_0101_0101;

/// Direction the picture moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a direction letter (`'U'`, `'D'`, `'L'`, `'R'`)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }

    /// One animation step
    ///
    /// Shifts `current` by one row or column, feeding in the edge of
    /// `incoming` that enters first, and shifts `incoming` the same way so
    /// the next step sees its next row or column. Returns the new
    /// `(current, incoming)` pair.
    pub const fn shift(self, current: u64, incoming: u64) -> (u64, u64) {
        match self {
            Direction::Up => ((current << 8) | (incoming >> 56), incoming << 8),
            Direction::Down => ((current >> 8) | (incoming << 56), incoming >> 8),
            Direction::Left => (
                ((current << 1) & !H_MASK) | ((incoming >> 7) & H_MASK),
                incoming << 1,
            ),
            Direction::Right => (
                ((current & !H_MASK) >> 1) | ((incoming & H_MASK) << 7),
                incoming >> 1,
            ),
        }
    }
}
