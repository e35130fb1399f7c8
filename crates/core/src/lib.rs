//! Structura Core Library
//!
//! Foundational utilities shared by the extraction library and the CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, ExtractMode};
pub use error::{AppError, AppResult};
