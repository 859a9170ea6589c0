//! Shared types and configuration for Ledgerline.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Amount rounding with decimal precision
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
