//! # Detector Common Library
//!
//! Shared code for the AI-generated image detector services:
//! - Bootstrap configuration (TOML + overrides)
//! - Detection service credential loading and setup guidance
//! - Common error types

pub mod config;
pub mod credentials;
pub mod error;

pub use credentials::{load_credentials, ConfigurationError, Credentials};
pub use error::{Error, Result};
