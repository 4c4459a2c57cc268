//! giftbook-config
//!
//! Persistent user preferences: display locale, currency unit, storage
//! backend and where the records live.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{app_dir, ConfigManager, HOME_ENV};
pub use model::{Backend, Config};
