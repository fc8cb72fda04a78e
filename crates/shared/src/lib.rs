//! Shared types, errors, and configuration for Pricewise.
//!
//! This crate provides common types used across all other crates:
//! - The closed set of supported currency codes
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CountryTable, PageSelectors};
pub use error::{AppError, AppResult};
pub use types::Currency;
