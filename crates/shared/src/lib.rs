//! Shared types, errors, and configuration for Paycycle.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Audit stamps (who/when) for lifecycle bookkeeping
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
