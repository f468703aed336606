//! Customer entity, insert shape, and API payloads.

use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Persisted customer row. The id is assigned by storage and immutable
/// once set; the credential is stored as a one-way hash, never raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
}

impl Customer {
    pub fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password")?,
            age: row.try_get("age")?,
        })
    }
}

/// Insert shape without an id; storage assigns one.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
}

/// Read-only projection returned by the API. Recomputed on every read,
/// never persisted. `username` re-exposes the email under the
/// authentication contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub roles: Vec<String>,
    pub username: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            age: customer.age,
            roles: vec!["ROLE_USER".to_string()],
            username: customer.email.clone(),
        }
    }
}

/// Registration payload. The raw password is consumed on registration
/// and never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i32,
}

/// Partial-update payload; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}
