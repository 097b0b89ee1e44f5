//! Domain models: configuration and Stellar data structures.

mod config;
mod stellar;

pub use config::{Config, ConfigError, Network};
pub use stellar::*;
