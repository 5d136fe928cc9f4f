use crate::core::asset::{Asset, AssetClass};
use crate::core::currency::{CurrencyCode, ExchangeRates, FxError, RateQuote};
use crate::core::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// A point-in-time copy of everything the engine reads.
///
/// Storage and the rate poller live outside this crate; callers hand over a
/// `Portfolio` by value and the computations never mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    pub base_currency: CurrencyCode,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub rates: Vec<RateQuote>,
}

impl Portfolio {
    pub fn new(base_currency: CurrencyCode) -> Self {
        Self {
            base_currency,
            ..Default::default()
        }
    }

    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn add_rate(&mut self, quote: RateQuote) {
        self.rates.push(quote);
    }

    /// Rate table triangulating through the base currency.
    pub fn exchange_rates(&self) -> Result<ExchangeRates, FxError> {
        ExchangeRates::from_quotes(self.base_currency.clone(), self.rates.iter().cloned())
    }
}

/// Whether any non-empty holding is tagged Crypto.
pub(crate) fn holds_crypto(assets: &[Asset]) -> bool {
    assets
        .iter()
        .any(|a| a.class == AssetClass::Crypto && !a.quantity.is_zero())
}
