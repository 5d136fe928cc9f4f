use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// ISO 4217-style currency code.
///
/// Codes are upper-cased on construction so that `"usd"` and `"USD"`
/// resolve to the same rate table entries.
///
/// # Examples
///
/// ```
/// use portfolio_engine::core::currency::CurrencyCode;
///
/// let usd = CurrencyCode::new("usd");
/// assert_eq!(usd.as_str(), "USD");
/// assert_ne!(usd, CurrencyCode::new("EUR"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        CurrencyCode::new("USD")
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CurrencyCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Errors arising from FX rate operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    #[error("no exchange rate available for {from} -> {to}")]
    MissingExchangeRate {
        from: CurrencyCode,
        to: CurrencyCode,
    },
    #[error("exchange rate must be positive, got {rate} for {from} -> {to}")]
    InvalidRate {
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    },
}

/// A single quoted rate: 1 unit of `from` = `rate` units of `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: Decimal,
}

/// Snapshot of exchange rates used to express every amount in one currency.
///
/// Rates are timeless: the same snapshot values today's holdings and every
/// reconstructed historical point. Callers pass the most recent snapshot they
/// have; nothing here refreshes itself.
///
/// Lookups try the identity, a direct (or stored inverse) rate, and finally a
/// single hop through the pivot currency.
///
/// # Examples
///
/// ```
/// use portfolio_engine::core::currency::{CurrencyCode, ExchangeRates};
/// use rust_decimal_macros::dec;
///
/// let mut rates = ExchangeRates::new(CurrencyCode::new("USD"));
/// rates.set_rate(CurrencyCode::new("EUR"), CurrencyCode::new("USD"), dec!(1.10)).unwrap();
/// rates.set_rate(CurrencyCode::new("GBP"), CurrencyCode::new("USD"), dec!(1.25)).unwrap();
///
/// let converted = rates.convert(
///     dec!(1000),
///     &CurrencyCode::new("EUR"),
///     &CurrencyCode::new("USD"),
/// ).unwrap();
/// assert_eq!(converted, dec!(1100));
///
/// // EUR -> GBP goes through the USD pivot.
/// assert!(rates.get_rate(&CurrencyCode::new("EUR"), &CurrencyCode::new("GBP")).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ExchangeRates {
    /// Currency used for triangulation when no direct rate exists.
    pub pivot: CurrencyCode,
    /// Direct rates: (from, to) -> rate.
    rates: HashMap<(CurrencyCode, CurrencyCode), Decimal>,
}

impl ExchangeRates {
    /// Create an empty rate table triangulating through `pivot`.
    pub fn new(pivot: CurrencyCode) -> Self {
        Self {
            pivot,
            rates: HashMap::new(),
        }
    }

    /// Build a table from a list of quotes.
    pub fn from_quotes(
        pivot: CurrencyCode,
        quotes: impl IntoIterator<Item = RateQuote>,
    ) -> Result<Self, FxError> {
        let mut table = Self::new(pivot);
        for quote in quotes {
            table.set_rate(quote.from, quote.to, quote.rate)?;
        }
        Ok(table)
    }

    /// Set a direct exchange rate: 1 unit of `from` = `rate` units of `to`.
    pub fn set_rate(
        &mut self,
        from: CurrencyCode,
        to: CurrencyCode,
        rate: Decimal,
    ) -> Result<(), FxError> {
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate { from, to, rate });
        }
        self.rates.insert((from.clone(), to.clone()), rate);
        self.rates.insert((to, from), Decimal::ONE / rate);
        Ok(())
    }

    /// Number of stored directed rates (inverses included).
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    fn direct(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<Decimal> {
        if from == to {
            return Some(Decimal::ONE);
        }
        self.rates.get(&(from.clone(), to.clone())).copied()
    }

    /// Get the exchange rate from one currency to another.
    pub fn get_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<Decimal, FxError> {
        if let Some(rate) = self.direct(from, to) {
            return Ok(rate);
        }
        let via_pivot = self
            .direct(from, &self.pivot)
            .zip(self.direct(&self.pivot, to))
            .map(|(a, b)| a * b);
        via_pivot.ok_or_else(|| FxError::MissingExchangeRate {
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// Convert an amount from one currency to another.
    pub fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, FxError> {
        let rate = self.get_rate(from, to)?;
        Ok(amount * rate)
    }
}
