//! Money type for catalog prices.
//!
//! Prices are stored as integer minor units (cents) so filter bounds and
//! ordering compare exactly; decimals only appear at the edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
    SEK,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
            Currency::SEK => "SEK",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
            Currency::CHF => "CHF ",
            Currency::SEK => "kr ",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Number of minor-unit decimal places.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    fn minor_units(&self) -> f64 {
        10_i64.pow(self.decimal_places()) as f64
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A price in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the currency's minor unit.
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest minor unit.
    ///
    /// ```
    /// use turbo_search::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::EUR);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * currency.minor_units()).round() as i64, currency)
    }

    /// Convert to a decimal amount.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_units()
    }

    /// Format with symbol and full precision (e.g., "€49.99").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.*}", self.currency.symbol(), places, self.to_decimal())
    }

    /// Format rounded to whole units (e.g., "€50").
    pub fn display_whole(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.whole_units())
    }

    /// Amount rounded to whole units, as text.
    pub fn whole_units(&self) -> String {
        format!("{:.0}", self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
