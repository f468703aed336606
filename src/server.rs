//! # Server Module
//!
//! HTTP server setup and route configuration for the customer server.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::jwt::JwtService;
use crate::auth::middleware::AuthMiddleware;
use crate::auth::password::PasswordEncoder;
use crate::config::{Config, StorageBackend};
use crate::customer::memory::InMemoryCustomerStore;
use crate::customer::postgres::PostgresCustomerStore;
use crate::customer::service::CustomerService;
use crate::customer::store::CustomerStore;
use crate::database::DatabaseConnection;
use crate::routes::customers;
use crate::routes::health::ping;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<CustomerService>,
    pub jwt: Arc<JwtService>,
}

/// Starts the customer-management HTTP server.
///
/// Loads configuration, wires the selected storage adapter into the
/// customer service, and serves the API until the process terminates.
pub async fn start() {
    let config = Config::from_env().expect("Failed to load configuration from environment");

    let jwt_service = Arc::new(JwtService::new(&config.auth.jwt_secret));

    // Pluggable storage strategy, selected at startup.
    let store: Arc<dyn CustomerStore> = match config.storage {
        StorageBackend::Postgres => {
            let db_config = crate::database::DatabaseConfig::from_env()
                .expect("Failed to load DB config from env");
            let db = DatabaseConnection::new(db_config)
                .await
                .expect("Failed to connect to DB");
            db.migrate().await.expect("Failed to run migrations");
            Arc::new(PostgresCustomerStore::new(db.pool().clone()))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory customer store; data will not survive restarts");
            Arc::new(InMemoryCustomerStore::new())
        }
    };

    let app_state = AppState {
        customers: Arc::new(CustomerService::new(store, PasswordEncoder::new())),
        jwt: jwt_service.clone(),
    };

    // Everything except registration and the health check requires a
    // valid bearer token.
    let protected_routes = Router::new()
        .route("/api/v1/customers", get(customers::list_customers))
        .route("/api/v1/customers/{customer_id}", get(customers::get_customer))
        .route("/api/v1/customers/{customer_id}", put(customers::update_customer))
        .route(
            "/api/v1/customers/{customer_id}",
            delete(customers::delete_customer),
        )
        .layer(middleware::from_fn_with_state(
            jwt_service.clone(),
            AuthMiddleware::validate_token,
        ));

    // Public registration endpoint; responds with a freshly issued token.
    let public_routes = Router::new()
        .route("/api/v1/customers", post(customers::register_customer))
        .route("/ping", get(ping));

    let app = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([
                        axum::http::Method::GET,
                        axum::http::Method::POST,
                        axum::http::Method::PUT,
                        axum::http::Method::DELETE,
                        axum::http::Method::OPTIONS,
                    ])
                    .allow_headers([
                        axum::http::header::ORIGIN,
                        axum::http::header::CONTENT_TYPE,
                        axum::http::header::ACCEPT,
                        axum::http::header::AUTHORIZATION,
                    ]),
            ),
        )
        .with_state(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address - port may already be in use");

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/ping", addr);
    tracing::info!("Customer endpoints available at http://{}/api/v1/customers", addr);

    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
