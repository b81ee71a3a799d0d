//! Board hardware configuration
//!
//! The badge has shipped on two LED layouts, both driven by an HT16K33
//! whose RAM is organised as 8 rows of 16 LEDs. Only the lower 8 LEDs of
//! each row are wired.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board revision, selecting the logical-to-physical LED mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoardRevision {
    /// Bi-colour 8x8 backpack on a breadboard, mounted upright
    Breadboard,
    /// 2025 production board, monochrome matrix rotated 180°
    #[default]
    Board2025,
}

impl BoardRevision {
    /// Map a logical pixel position (0-63) to the controller's LED index
    pub const fn led_index(self, pos: u8) -> u8 {
        let pos = pos & 63;
        let pos = match self {
            BoardRevision::Breadboard => pos,
            BoardRevision::Board2025 => 63 - pos,
        };
        (pos & 7) | ((pos & !7) << 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadboard_mapping() {
        let board = BoardRevision::Breadboard;
        assert_eq!(board.led_index(0), 0);
        assert_eq!(board.led_index(7), 7);
        assert_eq!(board.led_index(8), 16);
        assert_eq!(board.led_index(63), 119);
    }

    #[test]
    fn test_board2025_mapping_is_rotated() {
        let board = BoardRevision::Board2025;
        assert_eq!(board.led_index(0), 119);
        assert_eq!(board.led_index(63), 0);
        assert_eq!(board.led_index(56), 7);
    }

    #[test]
    fn test_mappings_are_injective() {
        for board in [BoardRevision::Breadboard, BoardRevision::Board2025] {
            let mut seen = [false; 128];
            for pos in 0..64u8 {
                let led = board.led_index(pos) as usize;
                assert!(led < 128);
                assert!(!seen[led]);
                seen[led] = true;
            }
        }
    }
}
