//! Crate-wide error type.
//!
//! Only missing exchange rates surface from the computations themselves;
//! the remaining variants come from parsing user-supplied input.

use crate::core::currency::FxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fx(#[from] FxError),

    #[error("unknown time range '{0}' (expected 1W, 1M, 3M, 6M, 1Y or ALL)")]
    UnknownRange(String),

    #[error("unknown asset class '{0}'")]
    UnknownAssetClass(String),

    #[error("unknown transaction kind '{0}' (expected Buy or Sell)")]
    UnknownTransactionKind(String),

    #[error("invalid trade date '{0}'")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
