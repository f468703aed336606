//! Authentication Middleware
//!
//! Axum middleware that runs ahead of every protected route: extracts the
//! bearer token from the `Authorization` header, validates it, and injects
//! the authenticated user into the request. A missing, invalid, or expired
//! token yields 403 with the canonical error body, never an anonymous
//! fallback.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{jwt::JwtService, models::AuthUser};
use crate::error::ApiError;

pub struct AuthMiddleware;

impl AuthMiddleware {
    pub async fn validate_token(
        State(jwt_service): State<Arc<JwtService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, ApiError> {
        let path = req.uri().path().to_string();

        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|auth_header| auth_header.strip_prefix("Bearer "))
            .map(|token| token.to_string());

        let token = match token {
            Some(token) => token,
            None => {
                tracing::warn!("missing bearer token for {} {}", req.method(), path);
                return Err(ApiError::forbidden("missing bearer token", &path));
            }
        };

        let claims = match jwt_service.validate_token(&token) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::warn!("token rejected for {}: {e:#}", path);
                return Err(ApiError::forbidden("invalid or expired token", &path));
            }
        };

        // Downstream handlers read the caller from request extensions.
        req.extensions_mut().insert(AuthUser {
            email: claims.sub,
            scopes: claims.scopes,
        });

        Ok(next.run(req).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn protected() -> &'static str {
        "ok"
    }

    fn router(jwt_service: Arc<JwtService>) -> Router {
        Router::new()
            .route("/api/v1/customers", get(protected))
            .layer(axum::middleware::from_fn_with_state(
                jwt_service,
                AuthMiddleware::validate_token,
            ))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_bearer_token_is_forbidden_with_error_envelope() {
        let app = router(Arc::new(JwtService::new("test_secret")));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/v1/customers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["path"], "/api/v1/customers");
        assert_eq!(body["statusCode"], 403);
        assert_eq!(body["message"], "missing bearer token");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_forbidden() {
        let app = router(Arc::new(JwtService::new("test_secret")));
        let token = JwtService::new("other_secret")
            .issue_token("a@b.com")
            .unwrap();

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/v1/customers")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["statusCode"], 403);
        assert_eq!(body["message"], "invalid or expired token");
    }

    #[tokio::test]
    async fn expired_token_is_forbidden() {
        let jwt_service = Arc::new(JwtService::with_lifetime(
            "test_secret",
            chrono::Duration::seconds(-1),
        ));
        let token = jwt_service.issue_token("a@b.com").unwrap();
        let app = router(jwt_service);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/v1/customers")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn valid_token_passes_through() {
        let jwt_service = Arc::new(JwtService::new("test_secret"));
        let token = jwt_service.issue_token("a@b.com").unwrap();
        let app = router(jwt_service);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/v1/customers")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
