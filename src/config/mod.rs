//! Configuration management for blitz.
//!
//! This module handles loading configuration and the stored token from `~/.blitz/`.

mod credentials;
mod paths;
mod settings;

pub use credentials::TokenStore;
pub use paths::Paths;
pub use settings::{ApiConfig, Config, DemoConfig, FocusConfig, GeneralConfig, SyncConfig};
