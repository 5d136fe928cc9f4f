//! Foundational types: currencies and rates, assets, transactions and the
//! portfolio snapshot they are handed in as.

pub mod asset;
pub mod currency;
pub mod portfolio;
pub mod transaction;
