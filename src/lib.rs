#![doc(test(attr(deny(warnings))))]

//! Giftbook keeps a record book of monetary gifts given and received at life
//! events and renders statistics over it.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("giftbook tracing initialized");
    });
}
