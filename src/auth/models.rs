//! Authentication Models

use serde::{Deserialize, Serialize};

/// Authenticated caller extracted from a validated JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
    pub scopes: Vec<String>,
}
