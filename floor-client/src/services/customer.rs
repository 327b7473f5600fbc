//! Customer endpoints (`/customer`)

use std::sync::Arc;

use shared::models::{AssignTable, Customer, CustomerCreate, CustomerUpdate};

use crate::{ClientResult, HttpClient};

#[derive(Debug)]
pub struct CustomerService<C> {
    http: Arc<C>,
}

impl<C> Clone for CustomerService<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
        }
    }
}

impl<C: HttpClient> CustomerService<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    /// GET /customer
    pub async fn list(&self) -> ClientResult<Vec<Customer>> {
        self.http.get("/customer").await
    }

    /// GET /customer/{id}
    pub async fn get(&self, id: i64) -> ClientResult<Customer> {
        self.http.get(&format!("/customer/{id}")).await
    }

    /// POST /customer - with `tableId` the customer is seated right away
    pub async fn create(&self, payload: &CustomerCreate) -> ClientResult<Customer> {
        self.http.post("/customer", payload).await
    }

    /// PATCH /customer/{id}
    pub async fn update(&self, id: i64, payload: &CustomerUpdate) -> ClientResult<Customer> {
        self.http.patch(&format!("/customer/{id}"), payload).await
    }

    /// PATCH /customer/{id}/assign-table
    pub async fn assign_table(&self, id: i64, payload: &AssignTable) -> ClientResult<Customer> {
        self.http
            .patch(&format!("/customer/{id}/assign-table"), payload)
            .await
    }

    /// PATCH /customer/{id}/leave - frees the customer's table
    pub async fn leave(&self, id: i64) -> ClientResult<()> {
        self.http.patch_empty(&format!("/customer/{id}/leave")).await
    }

    /// DELETE /customer/{id}
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/customer/{id}")).await
    }
}
