use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum InvalidAmount {
    #[error("amount must be a finite number (found {0})")]
    NonFinite(f64),
    #[error("amount {0} cannot be represented as a decimal")]
    OutOfRange(f64),
    #[error("amount must not be negative (found {0})")]
    Negative(f64),
}

/// Single-currency decimal amount (dollars for a trip).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// `Money::new(1250, 2)` is 12.50.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Accepts amounts coming from JSON numbers; NaN and infinities are rejected.
    pub fn try_from_f64(value: f64) -> Result<Self, InvalidAmount> {
        if !value.is_finite() {
            return Err(InvalidAmount::NonFinite(value));
        }
        Decimal::from_f64(value)
            .map(Self)
            .ok_or(InvalidAmount::OutOfRange(value))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::whole(12.0, Money::from_i64(12))]
    #[case::cents(33.33, Money::new(3333, 2))]
    #[case::negative(-0.5, Money::new(-5, 1))]
    fn try_from_f64_keeps_decimal_digits(#[case] value: f64, #[case] expected: Money) {
        assert_eq!(Money::try_from_f64(value), Ok(expected));
    }

    #[rstest]
    #[case::nan(f64::NAN)]
    #[case::infinity(f64::INFINITY)]
    #[case::negative_infinity(f64::NEG_INFINITY)]
    fn try_from_f64_rejects_non_finite(#[case] value: f64) {
        assert!(matches!(
            Money::try_from_f64(value),
            Err(InvalidAmount::NonFinite(_))
        ));
    }

    #[test]
    fn try_from_f64_rejects_values_beyond_decimal_range() {
        assert_eq!(
            Money::try_from_f64(1e30),
            Err(InvalidAmount::OutOfRange(1e30))
        );
    }

    #[test]
    fn arithmetic_and_sum() {
        let amounts = [Money::new(1050, 2), Money::new(-250, 2), Money::from_i64(2)];
        let total: Money = amounts.iter().sum();

        assert_eq!(total, Money::new(1000, 2));
        assert_eq!(-total, Money::new(-1000, 2));
        assert!(total.is_positive());
        assert!((-total).is_negative());
        assert!((total - total).is_zero());
    }

    #[test]
    fn display_keeps_scale() {
        assert_eq!(Money::new(1250, 2).to_string(), "12.50");
        assert_eq!(Money::new(-5, 2).to_string(), "-0.05");
    }
}
