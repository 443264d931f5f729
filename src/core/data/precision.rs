use std::f64::consts::LOG2_10;

/// Working precision of one frame, in significant decimal digits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precision {
    digits: u32,
}

impl Precision {
    /// Smallest precision a frame is ever computed at.
    pub const MIN_DIGITS: u32 = 1;

    #[must_use]
    pub fn from_digits(digits: u32) -> Self {
        Self {
            digits: digits.max(Self::MIN_DIGITS),
        }
    }

    #[must_use]
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// MPFR mantissa bits holding at least `digits` decimal digits.
    #[must_use]
    pub fn bits(&self) -> u32 {
        (f64::from(self.digits) * LOG2_10).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_cover_decimal_digits() {
        assert_eq!(Precision::from_digits(1).bits(), 4);
        assert_eq!(Precision::from_digits(6).bits(), 20);
        assert_eq!(Precision::from_digits(16).bits(), 54);
    }

    #[test]
    fn test_digits_never_drop_below_minimum() {
        assert_eq!(Precision::from_digits(0).digits(), Precision::MIN_DIGITS);
    }

    #[test]
    fn test_ordering_follows_digits() {
        assert!(Precision::from_digits(7) > Precision::from_digits(6));
    }
}
