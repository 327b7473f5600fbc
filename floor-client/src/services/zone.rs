//! Zone endpoints (`/zone`)

use std::sync::Arc;

use shared::models::{DiningTable, Zone, ZoneCreate, ZoneStatistics, ZoneUpdate};

use crate::{ClientResult, HttpClient};

#[derive(Debug)]
pub struct ZoneService<C> {
    http: Arc<C>,
}

impl<C> Clone for ZoneService<C> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
        }
    }
}

impl<C: HttpClient> ZoneService<C> {
    pub fn new(http: Arc<C>) -> Self {
        Self { http }
    }

    /// GET /zone - all zones with their tables
    pub async fn list(&self) -> ClientResult<Vec<Zone>> {
        self.http.get("/zone").await
    }

    /// GET /zone/{id}
    pub async fn get(&self, id: i64) -> ClientResult<Zone> {
        self.http.get(&format!("/zone/{id}")).await
    }

    /// GET /zone/statistics - available tables per zone
    pub async fn statistics(&self) -> ClientResult<Vec<ZoneStatistics>> {
        self.http.get("/zone/statistics").await
    }

    /// GET /zone/{id}/tables
    pub async fn tables(&self, id: i64) -> ClientResult<Vec<DiningTable>> {
        self.http.get(&format!("/zone/{id}/tables")).await
    }

    /// POST /zone
    pub async fn create(&self, payload: &ZoneCreate) -> ClientResult<Zone> {
        self.http.post("/zone", payload).await
    }

    /// PATCH /zone/{id} - rename
    pub async fn rename(&self, id: i64, name: &str) -> ClientResult<Zone> {
        let payload = ZoneUpdate {
            name: name.to_string(),
        };
        self.http.patch(&format!("/zone/{id}"), &payload).await
    }

    /// DELETE /zone/{id}
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/zone/{id}")).await
    }
}
