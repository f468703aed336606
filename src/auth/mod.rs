//! # Authentication Module
//!
//! JWT token issuance and validation, the request-filter middleware that
//! secures API endpoints, and password hashing.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
