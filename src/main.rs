//! # Customer Server
//!
//! Customer-management REST backend built with Rust, Axum, and Tokio:
//! CRUD over a single `Customer` entity, backed by a relational store,
//! fronted by stateless JWT bearer-token authentication.
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: server initialization and route configuration
//! - `config`: environment variable configuration management
//! - `auth`: JWT issuance/validation, auth middleware, password hashing
//! - `customer`: domain model, persistence gateway, customer service
//! - `database`: PostgreSQL pooling and embedded migrations
//! - `routes`: HTTP route handlers
//!
//! ## Running the Server
//! ```bash
//! DATABASE_URL=postgres://... JWT_SECRET=... cargo run
//! ```
//!
//! Set `CUSTOMER_STORE=memory` to run without a database.
//!
//! ## Health Check
//! ```bash
//! curl http://localhost:3000/ping
//! ```

mod auth;
mod config;
mod customer;
mod database;
mod error;
mod routes;
mod server;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Initializes the tracing subscriber and starts the HTTP server; runs
/// until the process is terminated.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::info!("Starting customer server...");
    tracing::info!(
        "Package: {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    server::start().await;
}
