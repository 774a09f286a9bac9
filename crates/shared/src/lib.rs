//! Shared types, errors, and configuration for Brickyard.
//!
//! This crate provides common types used across all other crates:
//! - Configuration management
//! - JWT session validation for the API boundary

pub mod config;
pub mod jwt;

pub use config::{AppConfig, LedgerConfig};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
