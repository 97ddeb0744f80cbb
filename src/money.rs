// src/money.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Minor units (cents) per major unit.
pub const SCALE: i64 = 100;

pub type AmountValue = i64;

/// A non-negative sum of money with two decimal places, kept as minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    cents: AmountValue,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount cannot be negative")]
    Negative,

    #[error("Amount has more than two decimal places: {0}")]
    TooPrecise(String),

    #[error("Invalid amount: {0}")]
    Invalid(String),

    #[error("Amount is too large")]
    Overflow,
}

impl Amount {
    pub fn from_cents(cents: AmountValue) -> Result<Self, MoneyError> {
        if cents < 0 {
            return Err(MoneyError::Negative);
        }
        Ok(Amount { cents })
    }

    /// Whole major units, e.g. `Amount::units(100)` is `100.00`.
    pub fn units(value: i64) -> Result<Self, MoneyError> {
        let cents = value.checked_mul(SCALE).ok_or(MoneyError::Overflow)?;
        Amount::from_cents(cents)
    }

    pub fn cents(&self) -> AmountValue {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    fn from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::Invalid(value.to_string()));
        }
        let scaled = value * SCALE as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(MoneyError::TooPrecise(value.to_string()));
        }
        if rounded >= i64::MAX as f64 || rounded < i64::MIN as f64 {
            return Err(MoneyError::Overflow);
        }
        Amount::from_cents(rounded as i64)
    }
}

impl Add for Amount {
    type Output = Result<Amount, MoneyError>;

    fn add(self, other: Self) -> Self::Output {
        self.cents
            .checked_add(other.cents)
            .map(|cents| Amount { cents })
            .ok_or(MoneyError::Overflow)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / SCALE, self.cents % SCALE)
    }
}

impl FromStr for Amount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(MoneyError::Negative);
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyError::Invalid(s.to_string()));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyError::Invalid(s.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyError::TooPrecise(s.to_string()));
        }

        let whole = whole
            .parse::<i64>()
            .map_err(|_| MoneyError::Overflow)?;
        let fraction = format!("{:0<2}", fraction)
            .parse::<i64>()
            .map_err(|_| MoneyError::Invalid(s.to_string()))?;

        let cents = whole
            .checked_mul(SCALE)
            .and_then(|c| c.checked_add(fraction))
            .ok_or(MoneyError::Overflow)?;
        Amount::from_cents(cents)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.cents % SCALE == 0 {
            serializer.serialize_i64(self.cents / SCALE)
        } else {
            serializer.serialize_f64(self.cents as f64 / SCALE as f64)
        }
    }
}

// Clients send amounts as plain JSON numbers; strings are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let parsed = match RawAmount::deserialize(deserializer)? {
            RawAmount::Int(value) => Amount::units(value),
            RawAmount::Float(value) => Amount::from_f64(value),
            RawAmount::Text(text) => Amount::from_str(&text),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
