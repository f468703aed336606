// # Routes Module
//
// - HTTP route handlers, organized by functionality into submodules.
// - Register new route modules here and wire them up in `server.rs`.

/// Health check and monitoring endpoints
pub mod health;

/// Customer CRUD endpoints
pub mod customers;
