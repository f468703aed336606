//! # Customer Module
//!
//! The customer domain: entity and payload types, the persistence gateway
//! trait with its in-memory and Postgres adapters, and the service that
//! owns validation, uniqueness checks, and partial-update diffing.

pub mod memory;
pub mod model;
pub mod postgres;
pub mod service;
pub mod store;
