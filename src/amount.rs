//! Exact decimal monetary amount.
//!
//! Transaction amounts are coerced into this type once at load time, so
//! every query sums and compares exact decimals instead of floats. The
//! parsed precision is kept as-is; 4 decimal places is only the display
//! minimum and the rounding applied to averages.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A signed amount with the precision it was parsed with.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use transaction_analyzer::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.5000");
///
/// let small = Amount::from_str("0.00004").unwrap();
/// assert_eq!(small.to_string(), "0.00004");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Decimal places shown at minimum, and kept by averages.
    pub const SCALE: u32 = 4;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Wraps a `Decimal` without changing its precision.
    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns the underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, returning `None` if the result is out of range.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Sums amounts, returning `None` on overflow. The empty sum is zero.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, Amount::checked_add)
    }

    /// Divides this amount evenly over `count` items, rounded to
    /// [`SCALE`](Self::SCALE) places.
    ///
    /// Returns `None` when `count` is zero.
    pub fn mean_over(self, count: usize) -> Option<Self> {
        self.0
            .checked_div(Decimal::from(count))
            .map(|mean| Amount(mean.round_dp(Self::SCALE)))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        // JSON numbers may arrive in exponent form.
        let decimal = if trimmed.contains(['e', 'E']) {
            Decimal::from_scientific(trimmed)?
        } else {
            Decimal::from_str(trimmed)?
        };
        Ok(Amount(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let normalized = self.0.normalize();
        if normalized.scale() > Self::SCALE {
            write!(f, "{}", normalized)
        } else {
            write!(f, "{:.4}", normalized)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
