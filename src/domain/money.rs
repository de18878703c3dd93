use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Monetary value held as integer cents.
///
/// Aggregation stays exact no matter how many small transactions are
/// summed; conversion to a two-decimal display form happens only at the
/// presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount of major units, rounding half away from
    /// zero at the cent boundary.
    pub fn from_major(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Ratio of `self` over `denominator`, as a percentage.
    pub fn percent_of(self, denominator: Money) -> f64 {
        (self.0 as f64 / denominator.0 as f64) * 100.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::add)
    }
}

impl fmt::Display for Money {
    /// Renders the amount with a leading sign inside the decimal body,
    /// e.g. `12.34` or `-5.00`, matching `toFixed(2)` style output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_major(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulation_is_exact_over_many_small_amounts() {
        // 0.1 + 0.2 drifts in binary floating point; cents do not.
        let total: Money = (0..1000).map(|_| Money::from_major(0.10)).sum();
        assert_eq!(total, Money::from_cents(10_000));
    }

    #[test]
    fn from_major_rounds_at_the_cent_boundary() {
        assert_eq!(Money::from_major(19.99), Money::from_cents(1999));
        assert_eq!(Money::from_major(10000.01), Money::from_cents(1_000_001));
    }

    #[test]
    fn display_matches_two_decimal_form() {
        assert_eq!(Money::from_cents(-500).to_string(), "-5.00");
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn serde_round_trips_through_decimal_major_units() {
        let money = Money::from_cents(5550);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "55.5");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }
}
