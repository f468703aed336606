//! Postgres-backed customer store using the deadpool connection pool.

use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::error::SqlState;

use crate::customer::model::{Customer, NewCustomer};
use crate::customer::store::{CustomerStore, StoreError};

pub struct PostgresCustomerStore {
    pool: Pool,
}

impl PostgresCustomerStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-violation on the email constraint to the domain-visible
/// duplicate error; everything else passes through as a database error.
fn map_unique_violation(err: tokio_postgres::Error) -> StoreError {
    if err
        .as_db_error()
        .is_some_and(|db| db.code() == &SqlState::UNIQUE_VIOLATION)
    {
        StoreError::DuplicateEmail
    } else {
        StoreError::Database(err)
    }
}

#[async_trait]
impl CustomerStore for PostgresCustomerStore {
    async fn select_all(&self) -> Result<Vec<Customer>, StoreError> {
        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT id, name, email, password, age FROM customer", &[])
            .await?;
        rows.iter()
            .map(|row| Customer::from_row(row).map_err(StoreError::Database))
            .collect()
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, name, email, password, age FROM customer WHERE id = $1",
                &[&id],
            )
            .await?;
        row.map(|r| Customer::from_row(&r)).transpose().map_err(StoreError::Database)
    }

    async fn select_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, name, email, password, age FROM customer WHERE email = $1",
                &[&email],
            )
            .await?;
        row.map(|r| Customer::from_row(&r)).transpose().map_err(StoreError::Database)
    }

    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM customer WHERE email = $1)",
                &[&email],
            )
            .await?;
        Ok(row.get(0))
    }

    async fn exists_with_id(&self, id: i64) -> Result<bool, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "SELECT EXISTS (SELECT 1 FROM customer WHERE id = $1)",
                &[&id],
            )
            .await?;
        Ok(row.get(0))
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO customer (name, email, password, age) \
                 VALUES ($1, $2, $3, $4) RETURNING id",
                &[
                    &customer.name,
                    &customer.email,
                    &customer.password_hash,
                    &customer.age,
                ],
            )
            .await
            .map_err(map_unique_violation)?;
        Ok(Customer {
            id: row.get(0),
            name: customer.name,
            email: customer.email,
            password_hash: customer.password_hash,
            age: customer.age,
        })
    }

    async fn update(&self, customer: &Customer) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        // One atomic multi-column write; the diff is the service's job.
        client
            .execute(
                "UPDATE customer SET name = $1, email = $2, password = $3, age = $4 \
                 WHERE id = $5",
                &[
                    &customer.name,
                    &customer.email,
                    &customer.password_hash,
                    &customer.age,
                    &customer.id,
                ],
            )
            .await
            .map_err(map_unique_violation)?;
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client
            .execute("DELETE FROM customer WHERE id = $1", &[&id])
            .await?;
        Ok(())
    }
}
