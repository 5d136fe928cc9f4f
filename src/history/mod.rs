//! Daily net worth history rebuilt from today's snapshot and the trade log.

pub mod drift;
pub mod range;
pub mod reconstruct;
pub mod replay;
pub mod summary;
