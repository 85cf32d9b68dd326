//! Middlegame/endgame score pair.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::phase::MAX_PHASE;

/// A score with separate middlegame and endgame components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub mg: i32,
    pub eg: i32,
}

/// Shorthand constructor for a [`Score`].
#[allow(non_snake_case)]
#[inline]
pub const fn S(mg: i32, eg: i32) -> Score {
    Score { mg, eg }
}

impl Score {
    pub const ZERO: Score = S(0, 0);

    /// Blend the two components by game phase (`MAX_PHASE` = pure middlegame).
    ///
    /// Division truncates toward zero, so `(-s).taper(p) == -s.taper(p)`.
    #[inline]
    pub fn taper(self, phase: i32) -> i32 {
        let phase = phase.clamp(0, MAX_PHASE);
        (self.mg * phase + self.eg * (MAX_PHASE - phase)) / MAX_PHASE
    }
}

impl Add for Score {
    type Output = Score;

    #[inline]
    fn add(self, rhs: Score) -> Score {
        S(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl Sub for Score {
    type Output = Score;

    #[inline]
    fn sub(self, rhs: Score) -> Score {
        S(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Score) {
        *self = *self - rhs;
    }
}

impl Neg for Score {
    type Output = Score;

    #[inline]
    fn neg(self) -> Score {
        S(-self.mg, -self.eg)
    }
}

#[cfg(test)]
mod tests {
    use super::{S, Score};
    use crate::eval::phase::MAX_PHASE;

    #[test]
    fn taper_endpoints() {
        let s = S(100, -40);
        assert_eq!(s.taper(MAX_PHASE), 100);
        assert_eq!(s.taper(0), -40);
        assert_eq!(s.taper(MAX_PHASE / 2), 30);
    }

    #[test]
    fn taper_is_odd() {
        for phase in 0..=MAX_PHASE {
            let s = S(37, -11);
            assert_eq!((-s).taper(phase), -s.taper(phase));
        }
    }

    #[test]
    fn arithmetic() {
        let mut s = Score::ZERO;
        s += S(3, 4);
        s -= S(1, 1);
        assert_eq!(s, S(2, 3));
        assert_eq!(s + S(1, 1) - S(3, 4), Score::ZERO);
    }
}
