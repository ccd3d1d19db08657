use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Exclusive bound on magnitude; anything larger cannot keep two decimal places.
const LIMIT: Decimal = dec!(100000000000000000000000000);

/// A monetary value with exactly 2 decimal places.
///
/// Every constructor rounds half away from zero, so a `Money` never carries
/// more precision than a cent and always displays as `0.00`-style text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Rounds `value` to cents, or returns `None` when its magnitude is too
    /// large to carry two decimal places.
    pub fn try_new(value: Decimal) -> Option<Self> {
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.abs() >= LIMIT {
            return None;
        }
        rounded.rescale(2);
        Some(Self(rounded))
    }

    /// Like [`Money::try_new`], panicking on out-of-range values.
    #[cfg(test)]
    pub fn new(value: Decimal) -> Self {
        Self::try_new(value).expect("money out of range")
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).and_then(Self::try_new)
    }

    /// Multiplies by a rate and rounds to cents; `None` on overflow.
    pub fn checked_mul(self, rate: Decimal) -> Option<Self> {
        self.0.checked_mul(rate).and_then(Self::try_new)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::try_new(value).ok_or_else(|| D::Error::custom(format!("amount out of range: {value}")))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
