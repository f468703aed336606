//! Storage abstraction for customer rows.
//!
//! Every adapter satisfies the same contract: `select_*` represents absence
//! with `None`, never an error; `insert` assigns the id; `update` replaces
//! the full row in one operation.

use async_trait::async_trait;
use thiserror::Error;

use crate::customer::model::{Customer, NewCustomer};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-constraint rejection on the email column.
    #[error("email already taken")]
    DuplicateEmail,

    #[error("database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),
}

/// Persistence gateway for the customer table. Implementations are
/// swappable at startup (in-memory for tests and local runs, Postgres
/// in production).
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn select_all(&self) -> Result<Vec<Customer>, StoreError>;

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError>;

    async fn select_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError>;

    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError>;

    async fn exists_with_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Inserts the customer and returns the stored row with its
    /// storage-assigned id.
    async fn insert(&self, customer: NewCustomer) -> Result<Customer, StoreError>;

    /// Replaces every column of the row identified by `customer.id`
    /// in a single atomic write.
    async fn update(&self, customer: &Customer) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}
