//! In-memory customer store.
//!
//! Backs unit tests and local runs without a database. Enforces the same
//! email uniqueness the relational schema enforces with its constraint, so
//! the service sees identical failure modes from either adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::customer::model::{Customer, NewCustomer};
use crate::customer::store::{CustomerStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    customers: Vec<Customer>,
    next_id: i64,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn select_all(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.inner.read().await.customers.clone())
    }

    async fn select_by_id(&self, id: i64) -> Result<Option<Customer>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn select_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().find(|c| c.email == email).cloned())
    }

    async fn exists_with_email(&self, email: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().any(|c| c.email == email))
    }

    async fn exists_with_id(&self, id: i64) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().any(|c| c.id == id))
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.customers.iter().any(|c| c.email == customer.email) {
            return Err(StoreError::DuplicateEmail);
        }
        inner.next_id += 1;
        let stored = Customer {
            id: inner.next_id,
            name: customer.name,
            email: customer.email,
            password_hash: customer.password_hash,
            age: customer.age,
        };
        inner.customers.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, customer: &Customer) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner
            .customers
            .iter()
            .any(|c| c.id != customer.id && c.email == customer.email)
        {
            return Err(StoreError::DuplicateEmail);
        }
        if let Some(existing) = inner.customers.iter_mut().find(|c| c.id == customer.id) {
            *existing = customer.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.customers.retain(|c| c.id != id);
        Ok(())
    }
}
