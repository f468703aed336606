//! Customer service: validation, uniqueness checks, and partial-update
//! diffing on top of the persistence gateway.

use std::sync::Arc;

use crate::auth::password::PasswordEncoder;
use crate::customer::model::{
    Customer, CustomerView, NewCustomer, RegistrationRequest, UpdateRequest,
};
use crate::customer::store::CustomerStore;
use crate::error::CustomerError;

pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    password_encoder: PasswordEncoder,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>, password_encoder: PasswordEncoder) -> Self {
        Self {
            store,
            password_encoder,
        }
    }

    pub async fn list_customers(&self) -> Result<Vec<CustomerView>, CustomerError> {
        let customers = self.store.select_all().await?;
        Ok(customers.iter().map(CustomerView::from).collect())
    }

    pub async fn get_customer(&self, id: i64) -> Result<CustomerView, CustomerError> {
        self.store
            .select_by_id(id)
            .await?
            .map(|c| CustomerView::from(&c))
            .ok_or(CustomerError::NotFound(id))
    }

    pub async fn register_customer(
        &self,
        request: RegistrationRequest,
    ) -> Result<(), CustomerError> {
        if self.store.exists_with_email(&request.email).await? {
            return Err(CustomerError::DuplicateEmail);
        }

        let password_hash = self
            .password_encoder
            .hash(&request.password)
            .map_err(CustomerError::PasswordHash)?;

        self.store
            .insert(NewCustomer {
                name: request.name,
                email: request.email,
                password_hash,
                age: request.age,
            })
            .await?;

        Ok(())
    }

    pub async fn delete_customer(&self, id: i64) -> Result<(), CustomerError> {
        if !self.store.exists_with_id(id).await? {
            return Err(CustomerError::NotFound(id));
        }
        self.store.delete_by_id(id).await?;
        Ok(())
    }

    /// Applies a three-field diff: a field is replaced only when present
    /// and different from the current value. A request that changes nothing
    /// is rejected before storage is touched. Changed fields are persisted
    /// together in one full-row update.
    pub async fn update_customer(
        &self,
        id: i64,
        request: UpdateRequest,
    ) -> Result<(), CustomerError> {
        let mut customer: Customer = self
            .store
            .select_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        let mut changes = false;

        if let Some(name) = request.name {
            if name != customer.name {
                customer.name = name;
                changes = true;
            }
        }

        if let Some(age) = request.age {
            if age != customer.age {
                customer.age = age;
                changes = true;
            }
        }

        if let Some(email) = request.email {
            if email != customer.email {
                if self.store.exists_with_email(&email).await? {
                    return Err(CustomerError::DuplicateEmail);
                }
                customer.email = email;
                changes = true;
            }
        }

        if !changes {
            return Err(CustomerError::NoChanges);
        }

        self.store.update(&customer).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::memory::InMemoryCustomerStore;

    fn service() -> (CustomerService, Arc<InMemoryCustomerStore>) {
        let store = Arc::new(InMemoryCustomerStore::new());
        let service = CustomerService::new(store.clone(), PasswordEncoder::new());
        (service, store)
    }

    fn registration(name: &str, email: &str, age: i32) -> RegistrationRequest {
        RegistrationRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn register_inserts_one_row_with_hashed_credential() {
        let (service, store) = service();

        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();

        let rows = store.select_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        let stored = &rows[0];
        assert_eq!(stored.name, "Alex");
        assert_eq!(stored.email, "alex@x.com");
        assert_eq!(stored.age, 18);
        assert_ne!(stored.password_hash, "pw");
        assert!(PasswordEncoder::new().verify("pw", &stored.password_hash));
    }

    #[tokio::test]
    async fn register_twice_with_same_email_is_conflict_without_insert() {
        let (service, store) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();

        let err = service
            .register_customer(registration("Other", "alex@x.com", 30))
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::DuplicateEmail));
        assert_eq!(store.select_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_customer_maps_to_view() {
        let (service, _) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();

        let view = service.get_customer(1).await.unwrap();

        assert_eq!(view.name, "Alex");
        assert_eq!(view.username, "alex@x.com");
        assert_eq!(view.roles, vec!["ROLE_USER".to_string()]);
    }

    #[tokio::test]
    async fn get_missing_customer_is_not_found() {
        let (service, _) = service();

        let err = service.get_customer(42).await.unwrap_err();

        assert!(matches!(err, CustomerError::NotFound(42)));
    }

    #[tokio::test]
    async fn list_returns_every_customer() {
        let (service, _) = service();
        service
            .register_customer(registration("Alex", "a@x.com", 18))
            .await
            .unwrap();
        service
            .register_customer(registration("Andro", "b@x.com", 22))
            .await
            .unwrap();

        let views = service.list_customers().await.unwrap();

        assert_eq!(views.len(), 2);
    }

    #[tokio::test]
    async fn delete_missing_customer_is_not_found_and_mutates_nothing() {
        let (service, store) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();

        let err = service.delete_customer(42).await.unwrap_err();

        assert!(matches!(err, CustomerError::NotFound(42)));
        assert_eq!(store.select_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let (service, store) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();

        service.delete_customer(1).await.unwrap();

        assert!(store.select_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changing_all_fields_replaces_them() {
        let (service, store) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 19))
            .await
            .unwrap();

        service
            .update_customer(
                1,
                UpdateRequest {
                    name: Some("Andro".to_string()),
                    email: Some("andro@x.com".to_string()),
                    age: Some(22),
                },
            )
            .await
            .unwrap();

        let stored = store.select_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Andro");
        assert_eq!(stored.email, "andro@x.com");
        assert_eq!(stored.age, 22);
    }

    #[tokio::test]
    async fn update_changing_one_field_leaves_the_rest_untouched() {
        let (service, store) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();
        let before = store.select_by_id(1).await.unwrap().unwrap();

        service
            .update_customer(
                1,
                UpdateRequest {
                    age: Some(23),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let after = store.select_by_id(1).await.unwrap().unwrap();
        assert_eq!(after.age, 23);
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.password_hash, before.password_hash);
    }

    #[tokio::test]
    async fn no_op_update_is_a_validation_error_and_touches_nothing() {
        let (service, store) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();
        let before = store.select_by_id(1).await.unwrap().unwrap();

        let err = service
            .update_customer(
                1,
                UpdateRequest {
                    name: Some("Alex".to_string()),
                    email: Some("alex@x.com".to_string()),
                    age: Some(18),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::NoChanges));
        assert_eq!(store.select_by_id(1).await.unwrap().unwrap(), before);
    }

    #[tokio::test]
    async fn empty_update_is_a_validation_error() {
        let (service, _) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();

        let err = service
            .update_customer(1, UpdateRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::NoChanges));
    }

    #[tokio::test]
    async fn update_to_an_email_held_by_another_row_is_conflict() {
        let (service, store) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();
        service
            .register_customer(registration("Andro", "andro@x.com", 22))
            .await
            .unwrap();

        let err = service
            .update_customer(
                2,
                UpdateRequest {
                    email: Some("alex@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::DuplicateEmail));
        let untouched = store.select_by_id(2).await.unwrap().unwrap();
        assert_eq!(untouched.email, "andro@x.com");
    }

    #[tokio::test]
    async fn update_of_missing_customer_is_not_found() {
        let (service, _) = service();

        let err = service
            .update_customer(
                42,
                UpdateRequest {
                    age: Some(23),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CustomerError::NotFound(42)));
    }

    // Register Alex at 18, bump only the age to 23.
    #[tokio::test]
    async fn register_then_partial_age_update_scenario() {
        let (service, store) = service();
        service
            .register_customer(registration("Alex", "alex@x.com", 18))
            .await
            .unwrap();

        service
            .update_customer(
                1,
                UpdateRequest {
                    name: None,
                    email: None,
                    age: Some(23),
                },
            )
            .await
            .unwrap();

        let stored = store.select_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.age, 23);
        assert_eq!(stored.name, "Alex");
        assert_eq!(stored.email, "alex@x.com");
        assert!(PasswordEncoder::new().verify("pw", &stored.password_hash));
    }
}
