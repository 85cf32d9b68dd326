//! Side colours.

use std::fmt;
use std::ops::Not;

/// The side owning a piece or having the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Number of colours.
    pub const COUNT: usize = 2;

    /// Both colours in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Array index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The other side.
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step a pawn of this colour advances by (+1 for White, -1 for Black).
    #[inline]
    pub const fn pawn_step(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Score multiplier turning a White-relative value into this side's view.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn opponent_is_involution() {
        for color in Color::ALL {
            assert_eq!(!!color, color);
            assert_ne!(!color, color);
        }
    }

    #[test]
    fn pawn_step_and_sign_agree() {
        assert_eq!(Color::White.pawn_step() as i32, Color::White.sign());
        assert_eq!(Color::Black.pawn_step() as i32, Color::Black.sign());
    }

    #[test]
    fn display_matches_fen() {
        assert_eq!(Color::White.to_string(), "w");
        assert_eq!(Color::Black.to_string(), "b");
    }
}
