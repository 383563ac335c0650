use crate::error::AmountRejection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Digits allowed after the decimal point (currency minor units).
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Significant digits allowed overall. The gateway takes the amount as a JSON
/// number, and up to 15 significant digits survive the trip through `f64` exactly.
pub const MAX_SIGNIFICANT_DIGITS: usize = 15;

/// Represents a positive monetary amount for a payment request.
///
/// Wraps `rust_decimal::Decimal` so that an `Amount` can only exist once it has
/// been checked to be strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, AmountRejection> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(AmountRejection::NotPositive)
        }
    }

    /// Parses the text typed into the amount field.
    ///
    /// Surrounding whitespace is ignored. Only `.` is accepted as the decimal
    /// separator; grouping separators and exponents are rejected. At most
    /// [`MAX_FRACTION_DIGITS`] decimals and [`MAX_SIGNIFICANT_DIGITS`] digits in total.
    pub fn parse(text: &str) -> Result<Self, AmountRejection> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AmountRejection::Empty);
        }
        let well_formed = text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
        if !well_formed {
            return Err(AmountRejection::NotANumber);
        }
        let value = Decimal::from_str(text).map_err(|_| AmountRejection::NotANumber)?;

        let unsigned = text.trim_start_matches(['+', '-']);
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(AmountRejection::TooManyDecimals);
        }
        if whole.trim_start_matches('0').len() + fraction.len() > MAX_SIGNIFICANT_DIGITS {
            return Err(AmountRejection::TooLarge);
        }
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Gbp];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedCurrency(pub String);

impl fmt::Display for UnsupportedCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported currency: {}", self.0)
    }
}

impl std::error::Error for UnsupportedCurrency {}

impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnsupportedCurrency(s.to_string()))
    }
}
