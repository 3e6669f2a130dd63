//! Common configuration, error, and API types shared across all crates

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
