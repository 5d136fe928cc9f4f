//! Today's valuation: per-asset base-currency values and the net worth /
//! cost basis anchor every history starts from.

pub mod snapshot;
