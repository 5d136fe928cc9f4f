use crate::core::currency::CurrencyCode;
use crate::error::Error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a holding in the portfolio.
///
/// # Examples
///
/// ```
/// use portfolio_engine::core::asset::AssetId;
///
/// let a = AssetId::new("aapl-brokerage");
/// assert_eq!(a.as_str(), "aapl-brokerage");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Fixed exposure tier an asset class maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskTier::High => "High",
            RiskTier::Medium => "Medium",
            RiskTier::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Class tag of a holding.
///
/// Deserializes leniently through [`FromStr`], so `"real estate"` and
/// `"Stocks"` are accepted alongside the canonical variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AssetClass {
    Stock,
    Crypto,
    Fund,
    Cash,
    RealEstate,
    Liability,
}

impl AssetClass {
    pub const ALL: [AssetClass; 6] = [
        AssetClass::Stock,
        AssetClass::Crypto,
        AssetClass::Fund,
        AssetClass::Cash,
        AssetClass::RealEstate,
        AssetClass::Liability,
    ];

    pub fn is_liability(self) -> bool {
        self == AssetClass::Liability
    }

    /// Risk tier for exposure reporting. Liabilities carry no tier.
    pub fn risk_tier(self) -> Option<RiskTier> {
        match self {
            AssetClass::Crypto => Some(RiskTier::High),
            AssetClass::Stock => Some(RiskTier::Medium),
            AssetClass::Fund | AssetClass::Cash | AssetClass::RealEstate => Some(RiskTier::Low),
            AssetClass::Liability => None,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssetClass::Stock => "Stock",
            AssetClass::Crypto => "Crypto",
            AssetClass::Fund => "Fund",
            AssetClass::Cash => "Cash",
            AssetClass::RealEstate => "RealEstate",
            AssetClass::Liability => "Liability",
        };
        f.write_str(label)
    }
}

impl FromStr for AssetClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "stock" | "stocks" => Ok(AssetClass::Stock),
            "crypto" => Ok(AssetClass::Crypto),
            "fund" | "funds" => Ok(AssetClass::Fund),
            "cash" => Ok(AssetClass::Cash),
            "realestate" => Ok(AssetClass::RealEstate),
            "liability" | "liabilities" => Ok(AssetClass::Liability),
            _ => Err(Error::UnknownAssetClass(s.to_string())),
        }
    }
}

impl TryFrom<String> for AssetClass {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A current holding.
///
/// `quantity`, `avg_cost` and `current_price` are in the asset's native
/// currency. Liabilities store positive magnitudes; the sign flip happens
/// wherever holdings are summed into net worth.
///
/// # Examples
///
/// ```
/// use portfolio_engine::core::asset::{Asset, AssetClass};
/// use portfolio_engine::core::currency::CurrencyCode;
/// use rust_decimal_macros::dec;
///
/// let aapl = Asset::new("aapl", "AAPL", AssetClass::Stock, dec!(10), dec!(80), dec!(100), CurrencyCode::new("USD"))
///     .with_name("Apple Inc.");
/// assert_eq!(aapl.market_value(), dec!(1000));
/// assert_eq!(aapl.cost_value(), dec!(800));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub class: AssetClass,
    pub quantity: Decimal,
    pub avg_cost: Decimal,
    pub current_price: Decimal,
    pub currency: CurrencyCode,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        class: AssetClass,
        quantity: Decimal,
        avg_cost: Decimal,
        current_price: Decimal,
        currency: CurrencyCode,
    ) -> Self {
        let symbol = symbol.into();
        Self {
            id: AssetId::new(id),
            name: symbol.clone(),
            symbol,
            class,
            quantity,
            avg_cost,
            current_price,
            currency,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// `quantity × current_price`, native currency.
    pub fn market_value(&self) -> Decimal {
        self.quantity * self.current_price
    }

    /// `quantity × avg_cost`, native currency.
    pub fn cost_value(&self) -> Decimal {
        self.quantity * self.avg_cost
    }

    /// Label for presentation: the name, falling back to the symbol.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.symbol
        } else {
            &self.name
        }
    }
}
