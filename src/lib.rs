//! reelscout library
//!
//! A caching TMDB client plus the application and rendering layers used by
//! the `reelscout` binary. The modules are public so integration tests can
//! drive the client against a mock server.

pub mod app;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod data;
pub mod format;
pub mod ui;

pub use app::App;
pub use cache::{CacheCategory, CacheTtls};
pub use config::{Config, ConfigError};
pub use data::{ApiError, TmdbClient};
