//! giftbook-domain
//!
//! Pure domain models (Record, Category, Relation, RecordKind).
//! No I/O, no CLI, no storage. Only data types and closed taxonomies.

pub mod common;
pub mod record;
pub mod taxonomy;

pub use common::*;
pub use record::*;
pub use taxonomy::*;
