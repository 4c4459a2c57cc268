//! giftbook-core
//!
//! Aggregation engine and record services for the gift record book.
//! Depends on giftbook-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod error;
pub mod format;
pub mod record_service;
pub mod sample_data;
pub mod stats_service;
pub mod storage;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use format::*;
pub use record_service::*;
pub use stats_service::*;
