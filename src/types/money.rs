use crate::types::errors::MoneyError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::str::FromStr;
use tracing::error;

const DECIMAL_PLACES: u32 = 2;

/// An exact decimal amount of money.
///
/// Sums are kept at full precision; rounding to cents (half to even) only
/// happens when a value is handed out through [`Money::rounded`] or printed.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    #[cfg(test)]
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Price of `quantity` units at `self` per unit.
    pub fn times(self, quantity: i64) -> Result<Money, MoneyError> {
        self.0.checked_mul(Decimal::from(quantity))
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Average over `count` items, zero when there are none.
    pub fn average_over(self, count: usize) -> Money {
        if count == 0 {
            return Money::ZERO;
        }

        self.0.checked_div(Decimal::from(count as u64))
            .map(Money)
            .unwrap_or(Money::ZERO)
    }

    /// Share of `total` taken by `self`, in percent, zero when `total` is zero.
    pub fn percentage_of(self, total: Money) -> Decimal {
        if total.is_zero() {
            return Decimal::ZERO;
        }

        self.0.checked_div(total.0)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(round_to_cents)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn rounded(self) -> Money {
        Money(round_to_cents(self.0))
    }
}

pub fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

impl AddAssign<Money> for Money {
    fn add_assign(&mut self, rhs: Money) {
        if let Some(new_val) = self.checked_add(rhs) {
            self.0 = new_val.0;
        } else {
            error!("Money AddAssign error: Overflow")
        }
    }
}

#[cfg(test)]
impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money(Decimal::from(value))
    }
}

impl Display for Money {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.prec$}", self.rounded().0, prec = DECIMAL_PLACES as usize)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses a price such as `1,299.50`. Thousands separators are dropped and
    /// scientific notation (`1.5e3`) is accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() {
            return Err(MoneyError::InvalidFormat("Value is an empty string".to_string()));
        }

        Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .map(Money)
            .map_err(|error| MoneyError::InvalidFormat(format!("{cleaned:?}: {error}")))
    }
}
