//! Conversion between decimal money and integer atomic units.
//!
//! Settlement arithmetic runs on integer atomic units (cents for dollars) so
//! repeated additions never drift. Amounts are rounded to the nearest unit on
//! the way in and rebuilt exactly on the way out.

use crate::model::Money;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

const MAX_SETTLEMENT_SCALE: u32 = 22;

/// Rounding mode used when an amount has more digits than the atomic unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (0.005 -> 0.01, -0.005 -> -0.01).
    #[default]
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AtomicUnitConversionError {
    #[error("amount does not fit in 64-bit atomic units")]
    OutOfRange,
    #[error("scale {scale} is not supported (max {max_supported})")]
    UnsupportedScale { scale: u32, max_supported: u32 },
}

/// Settlement currency configuration.
///
/// # Example
/// ```
/// use tripsplit_domain::{Money, SettlementContext};
///
/// let ctx = SettlementContext::usd_default();
/// assert_eq!(ctx.to_atomic_units_i64(Money::new(33335, 3)), Ok(3334));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementContext {
    /// Number of decimal places for the atomic unit (2 for dollars, 0 for yen).
    pub scale: u32,
    pub rounding_mode: RoundingMode,
}

impl Default for SettlementContext {
    fn default() -> Self {
        Self::usd_default()
    }
}

impl SettlementContext {
    /// Dollars and cents, half-up rounding.
    pub fn usd_default() -> Self {
        Self {
            scale: 2,
            rounding_mode: RoundingMode::HalfUp,
        }
    }

    /// Converts a money amount to integer atomic units, rounding to the nearest unit.
    pub fn to_atomic_units_i64(self, amount: Money) -> Result<i64, AtomicUnitConversionError> {
        self.validate_scale()?;
        let factor = Decimal::from_i128_with_scale(10_i128.pow(self.scale), 0);
        amount
            .as_decimal()
            .checked_mul(factor)
            .map(|units| units.round_dp_with_strategy(0, self.rounding_mode.strategy()))
            .and_then(|units| units.to_i64())
            .ok_or(AtomicUnitConversionError::OutOfRange)
    }

    pub fn from_atomic_units(self, units: i64) -> Result<Money, AtomicUnitConversionError> {
        self.validate_scale()?;
        Ok(Money::new(units, self.scale))
    }

    fn validate_scale(self) -> Result<(), AtomicUnitConversionError> {
        if self.scale > MAX_SETTLEMENT_SCALE {
            return Err(AtomicUnitConversionError::UnsupportedScale {
                scale: self.scale,
                max_supported: MAX_SETTLEMENT_SCALE,
            });
        }
        Ok(())
    }
}
