//! # Database Module
//!
//! PostgreSQL integration: pooled connection management and embedded
//! migrations.

pub mod connection;
pub mod migrations;

pub use connection::{DatabaseConfig, DatabaseConnection};
