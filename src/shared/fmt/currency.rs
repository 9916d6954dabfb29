//! Currency formatting for price display.
//!
//! Prices are shown with the ISO currency code in front, two fixed decimals and
//! comma thousands separators (`RUB 1,234.50`). The currency is part of the view
//! configuration, not chosen by the user.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency code used for every displayed price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_ascii_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Format an amount as `CODE 1,234.50`.
    pub fn display(&self, amount: &Decimal) -> String {
        display(amount, self.code())
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new("RUB")
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format a `Decimal` with a currency code, rounded half-away-from-zero to cents.
pub fn display(amount: &Decimal, code: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = rounded.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{}{} {}.{}", sign, code, group_thousands(integer), fraction)
}

/// Insert comma separators into a run of ASCII digits.
pub fn group_thousands(digits: &str) -> String {
    digits
        .chars()
        .rev()
        .collect::<String>()
        .as_bytes()
        .chunks(3)
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect::<String>()
}
