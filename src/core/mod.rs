//! Core infrastructure: configuration and error types.

pub mod config;
pub mod error;

pub use config::RdfConfig;
pub use error::{RdfError, RdfResult};
