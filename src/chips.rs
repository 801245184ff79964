use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

const CENTS_PER_UNIT: i64 = 100;

/// Largest amount accepted from outside, in whole units.
const MAX_UNITS: f64 = 1e12;

/// An amount of money, held as whole cents so that moving chips between
/// stacks never gains or loses a fraction. Crosses serde and wasm as a
/// plain number of units (`12.5` is twelve and a half).
///
/// Arithmetic saturates at the `i64` range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Chips(i64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub const fn from_cents(cents: i64) -> Self {
        Chips(cents)
    }

    pub const fn whole(units: i64) -> Self {
        Chips(units * CENTS_PER_UNIT)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    /// Scales by a payout multiplier.
    pub fn times(self, multiplier: i8) -> Chips {
        Chips(self.0.saturating_mul(i64::from(multiplier)))
    }
}

/// Rounds to the nearest cent.
impl TryFrom<f64> for Chips {
    type Error = GameError;

    fn try_from(amount: f64) -> Result<Self, GameError> {
        if !amount.is_finite() || amount.abs() > MAX_UNITS {
            return Err(GameError::InvalidAmount(amount));
        }
        Ok(Chips((amount * CENTS_PER_UNIT as f64).round() as i64))
    }
}

impl From<Chips> for f64 {
    fn from(chips: Chips) -> f64 {
        chips.to_f64()
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, other: Chips) -> Chips {
        Chips(self.0.saturating_add(other.0))
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, other: Chips) {
        *self = *self + other;
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, other: Chips) {
        *self = *self - other;
    }
}

impl Neg for Chips {
    type Output = Chips;

    fn neg(self) -> Chips {
        Chips(self.0.saturating_neg())
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        let units = cents / CENTS_PER_UNIT as u64;
        match cents % CENTS_PER_UNIT as u64 {
            0 => write!(f, "{sign}{units}"),
            rest => write!(f, "{sign}{units}.{rest:02}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_round_to_the_nearest_cent() {
        assert_eq!(Chips::try_from(2.41), Ok(Chips::from_cents(241)));
        assert_eq!(Chips::try_from(0.1 + 0.2), Ok(Chips::from_cents(30)));
        assert_eq!(Chips::try_from(-3.0), Ok(Chips::whole(-3)));
        assert_eq!(Chips::try_from(1.006), Ok(Chips::from_cents(101)));
    }

    #[test]
    fn rejects_amounts_that_are_not_numbers() {
        assert!(matches!(Chips::try_from(f64::NAN), Err(GameError::InvalidAmount(_))));
        assert_eq!(
            Chips::try_from(f64::INFINITY),
            Err(GameError::InvalidAmount(f64::INFINITY))
        );
        assert_eq!(Chips::try_from(1e13), Err(GameError::InvalidAmount(1e13)));
    }

    #[test]
    fn cent_arithmetic_is_exact() {
        let mut stack = Chips::whole(100);
        for _ in 0..10 {
            stack -= Chips::try_from(0.1).unwrap();
        }
        assert_eq!(stack, Chips::whole(99));
        assert_eq!(Chips::from_cents(241).times(-2), Chips::from_cents(-482));
        assert_eq!(-Chips::whole(3) + Chips::whole(3), Chips::ZERO);
    }

    #[test]
    fn displays_units_and_cents() {
        assert_eq!(Chips::whole(12).to_string(), "12");
        assert_eq!(Chips::from_cents(1250).to_string(), "12.50");
        assert_eq!(Chips::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn serializes_as_a_plain_number() {
        assert_eq!(serde_json::to_string(&Chips::from_cents(2550)).unwrap(), "25.5");
        assert_eq!(serde_json::from_str::<Chips>("7").unwrap(), Chips::whole(7));
        assert_eq!(serde_json::from_str::<Chips>("0.07").unwrap(), Chips::from_cents(7));
        assert!(serde_json::from_str::<Chips>("\"7\"").is_err());
    }
}
