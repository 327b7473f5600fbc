//! Table endpoints (`/table`)

use std::sync::Arc;

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

use crate::{ClientResult, HttpClient};

#[derive(Debug)]
pub struct TableService<C> {
    http: Arc<C>,
}

impl<C> Clone for TableService<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
        }
    }
}

impl<C: HttpClient> TableService<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    /// GET /table
    pub async fn list(&self) -> ClientResult<Vec<DiningTable>> {
        self.http.get("/table").await
    }

    /// GET /table/{id}
    pub async fn get(&self, id: i64) -> ClientResult<DiningTable> {
        self.http.get(&format!("/table/{id}")).await
    }

    /// GET /table/available
    pub async fn available(&self) -> ClientResult<Vec<DiningTable>> {
        self.http.get("/table/available").await
    }

    /// POST /table
    pub async fn create(&self, payload: &DiningTableCreate) -> ClientResult<DiningTable> {
        self.http.post("/table", payload).await
    }

    /// PATCH /table/{id}
    pub async fn update(&self, id: i64, payload: &DiningTableUpdate) -> ClientResult<DiningTable> {
        self.http.patch(&format!("/table/{id}"), payload).await
    }

    /// DELETE /table/{id}
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/table/{id}")).await
    }
}
