//! Customer CRUD endpoints.
//!
//! Thin handlers translating requests to customer-service calls and mapping
//! domain errors to status codes. Registration is the only public route; it
//! returns a freshly issued token in the `Authorization` response header.

use axum::extract::{OriginalUri, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::customer::model::{CustomerView, RegistrationRequest, UpdateRequest};
use crate::error::ApiError;
use crate::server::AppState;

/// GET /api/v1/customers
pub async fn list_customers(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Vec<CustomerView>>, ApiError> {
    state
        .customers
        .list_customers()
        .await
        .map(Json)
        .map_err(|e| ApiError::new(e, uri.path()))
}

/// GET /api/v1/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(customer_id): Path<i64>,
) -> Result<Json<CustomerView>, ApiError> {
    state
        .customers
        .get_customer(customer_id)
        .await
        .map(Json)
        .map_err(|e| ApiError::new(e, uri.path()))
}

/// POST /api/v1/customers (public)
///
/// Registers a customer and hands the new subject a bearer token in the
/// `Authorization` response header.
pub async fn register_customer(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(request): Json<RegistrationRequest>,
) -> Result<Response, ApiError> {
    let email = request.email.clone();

    state
        .customers
        .register_customer(request)
        .await
        .map_err(|e| ApiError::new(e, uri.path()))?;

    let token = state
        .jwt
        .issue_token_with_scopes(&email, &["ROLE_USER"])
        .map_err(|e| ApiError::internal(e, uri.path()))?;

    tracing::info!("registered customer {}", email);

    Ok(([(header::AUTHORIZATION, token)], StatusCode::OK).into_response())
}

/// PUT /api/v1/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(customer_id): Path<i64>,
    Json(request): Json<UpdateRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .customers
        .update_customer(customer_id, request)
        .await
        .map(|_| StatusCode::OK)
        .map_err(|e| ApiError::new(e, uri.path()))
}

/// DELETE /api/v1/customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(customer_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .customers
        .delete_customer(customer_id)
        .await
        .map(|_| StatusCode::OK)
        .map_err(|e| ApiError::new(e, uri.path()))
}
