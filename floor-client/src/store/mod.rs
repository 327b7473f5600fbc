//! FloorStore - single source of truth for zones, tables and customers
//!
//! ```text
//! view-models ──mutation──▶ FloorStore ──HTTP──▶ backend
//!      ▲                        │
//!      └──── watch::Receiver ◀──┘ (patched collection)
//! ```
//!
//! Each collection lives in a `watch` channel. Loads replace a collection
//! as a whole; mutations patch it by id once the backend has answered, in
//! the order the answers arrive (last write wins). Nothing is cached
//! beyond these collections and nothing is retried.

mod reconcile;
mod state;

pub use reconcile::Keyed;
pub use state::{Collection, LoadState};

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use shared::models::{
    AssignTable, Customer, CustomerCreate, CustomerUpdate, DiningTable, DiningTableCreate,
    DiningTableUpdate, Zone, ZoneCreate, ZoneRef, ZoneStatistics,
};
use tokio::sync::watch;

use crate::notify::NotificationCenter;
use crate::services::{CustomerService, TableService, ZoneService};
use crate::{ClientConfig, ClientResult, HttpClient, NetworkHttpClient};

struct StoreInner<C> {
    zone_api: ZoneService<C>,
    table_api: TableService<C>,
    customer_api: CustomerService<C>,
    zones: watch::Sender<Collection<Zone>>,
    tables: watch::Sender<Collection<DiningTable>>,
    customers: watch::Sender<Collection<Customer>>,
    notifications: NotificationCenter,
}

/// Shared, cloneable handle to the store
pub struct FloorStore<C = NetworkHttpClient> {
    inner: Arc<StoreInner<C>>,
}

impl<C> Clone for FloorStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl FloorStore<NetworkHttpClient> {
    /// Store talking to the backend described by `config`
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        tracing::info!(base_url = http.base_url(), "Floor store connected");
        Ok(Self::new(http))
    }
}

impl<C: HttpClient> FloorStore<C> {
    pub fn new(http: C) -> Self {
        let http = Arc::new(http);
        Self {
            inner: Arc::new(StoreInner {
                zone_api: ZoneService::new(http.clone()),
                table_api: TableService::new(http.clone()),
                customer_api: CustomerService::new(http),
                zones: watch::channel(LoadState::Idle).0,
                tables: watch::channel(LoadState::Idle).0,
                customers: watch::channel(LoadState::Idle).0,
                notifications: NotificationCenter::new(),
            }),
        }
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    // ========== Snapshots & subscriptions ==========

    pub fn zones(&self) -> Collection<Zone> {
        self.inner.zones.borrow().clone()
    }

    pub fn tables(&self) -> Collection<DiningTable> {
        self.inner.tables.borrow().clone()
    }

    pub fn customers(&self) -> Collection<Customer> {
        self.inner.customers.borrow().clone()
    }

    pub fn subscribe_zones(&self) -> watch::Receiver<Collection<Zone>> {
        self.inner.zones.subscribe()
    }

    pub fn subscribe_tables(&self) -> watch::Receiver<Collection<DiningTable>> {
        self.inner.tables.subscribe()
    }

    pub fn subscribe_customers(&self) -> watch::Receiver<Collection<Customer>> {
        self.inner.customers.subscribe()
    }

    // ========== Loads ==========

    /// GET /zone into the zone collection
    pub async fn load_zones(&self) -> ClientResult<()> {
        self.load_into("zones", &self.inner.zones, self.inner.zone_api.list())
            .await
    }

    /// GET /table into the table collection
    pub async fn load_tables(&self) -> ClientResult<()> {
        self.load_into("tables", &self.inner.tables, self.inner.table_api.list())
            .await
    }

    /// GET /customer into the customer collection
    pub async fn load_customers(&self) -> ClientResult<()> {
        self.load_into(
            "customers",
            &self.inner.customers,
            self.inner.customer_api.list(),
        )
        .await
    }

    async fn load_into<T>(
        &self,
        what: &str,
        slot: &watch::Sender<Collection<T>>,
        fetch: impl Future<Output = ClientResult<Vec<T>>>,
    ) -> ClientResult<()> {
        slot.send_replace(LoadState::Loading);
        match fetch.await {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Loaded {what}");
                slot.send_replace(LoadState::Ready(items));
                Ok(())
            }
            Err(e) => {
                slot.send_replace(LoadState::Failed(e.to_string()));
                self.report(&format!("Load {what}"), Err(e))
            }
        }
    }

    // ========== Reads ==========

    pub async fn fetch_zone(&self, id: i64) -> ClientResult<Zone> {
        let result = self.inner.zone_api.get(id).await;
        self.report("Load zone", result)
    }

    pub async fn fetch_table(&self, id: i64) -> ClientResult<DiningTable> {
        let result = self.inner.table_api.get(id).await;
        self.report("Load table", result)
    }

    pub async fn fetch_customer(&self, id: i64) -> ClientResult<Customer> {
        let result = self.inner.customer_api.get(id).await;
        self.report("Load customer", result)
    }

    /// GET /zone/{id}/tables
    pub async fn zone_tables(&self, zone_id: i64) -> ClientResult<Vec<DiningTable>> {
        let result = self.inner.zone_api.tables(zone_id).await;
        self.report("Load zone tables", result)
    }

    /// GET /table/available
    pub async fn available_tables(&self) -> ClientResult<Vec<DiningTable>> {
        let result = self.inner.table_api.available().await;
        self.report("Load available tables", result)
    }

    /// GET /zone/statistics
    pub async fn zone_statistics(&self) -> ClientResult<Vec<ZoneStatistics>> {
        let result = self.inner.zone_api.statistics().await;
        self.report("Load zone statistics", result)
    }

    // ========== Zone mutations ==========

    pub async fn create_zone(&self, name: &str) -> ClientResult<Zone> {
        let payload = ZoneCreate {
            name: name.to_string(),
        };
        let mut zone = self.report("Create zone", self.inner.zone_api.create(&payload).await)?;
        // A new zone has no tables yet; an empty list lets later table adds land in it
        zone.tables.get_or_insert_with(Vec::new);

        tracing::info!(zone_id = zone.id, name = %zone.name, "Zone created");
        modify_ready(&self.inner.zones, |zones| reconcile::upsert(zones, zone.clone()));
        Ok(zone)
    }

    pub async fn rename_zone(&self, id: i64, name: &str) -> ClientResult<Zone> {
        let mut zone = self.report("Rename zone", self.inner.zone_api.rename(id, name).await)?;

        tracing::info!(zone_id = id, name = %zone.name, "Zone renamed");
        if zone.tables.is_none() {
            zone.tables = self
                .inner
                .zones
                .borrow()
                .ready()
                .and_then(|zones| zones.iter().find(|z| z.id == id))
                .and_then(|z| z.tables.clone());
        }
        modify_ready(&self.inner.zones, |zones| reconcile::upsert(zones, zone.clone()));
        modify_ready(&self.inner.tables, |tables| {
            reconcile::rename_zone_refs(tables, id, &zone.name)
        });
        Ok(zone)
    }

    pub async fn delete_zone(&self, id: i64) -> ClientResult<()> {
        self.report("Delete zone", self.inner.zone_api.delete(id).await)?;

        tracing::info!(zone_id = id, "Zone deleted");
        let mut removed: BTreeSet<i64> = self
            .inner
            .zones
            .borrow()
            .ready()
            .and_then(|zones| zones.iter().find(|z| z.id == id))
            .and_then(|z| z.tables.as_ref())
            .map(|tables| tables.iter().map(|t| t.id).collect())
            .unwrap_or_default();
        modify_ready(&self.inner.zones, |zones| {
            reconcile::remove(zones, id);
        });
        modify_ready(&self.inner.tables, |tables| {
            removed.extend(tables.iter().filter(|t| t.zone_id() == Some(id)).map(|t| t.id));
            tables.retain(|t| t.zone_id() != Some(id))
        });
        // The backend unseats customers of the removed tables
        modify_ready(&self.inner.customers, |customers| {
            for c in customers.iter_mut() {
                if c.table.as_ref().is_some_and(|t| removed.contains(&t.id)) {
                    c.table = None;
                }
            }
        });
        Ok(())
    }

    // ========== Table mutations ==========

    pub async fn create_table(&self, payload: &DiningTableCreate) -> ClientResult<DiningTable> {
        let mut table = self.report("Create table", self.inner.table_api.create(payload).await)?;

        tracing::info!(table_id = table.id, zone_id = payload.zone_id, "Table created");
        self.fill_zone(&mut table, Some(payload.zone_id));
        self.apply_table(&table);
        Ok(table)
    }

    pub async fn update_table(
        &self,
        id: i64,
        payload: &DiningTableUpdate,
    ) -> ClientResult<DiningTable> {
        let mut table = self.report(
            "Update table",
            self.inner.table_api.update(id, payload).await,
        )?;

        tracing::info!(table_id = id, "Table updated");
        self.fill_zone(&mut table, payload.zone_id);
        self.apply_table(&table);
        Ok(table)
    }

    pub async fn delete_table(&self, id: i64) -> ClientResult<()> {
        self.report("Delete table", self.inner.table_api.delete(id).await)?;

        tracing::info!(table_id = id, "Table deleted");
        modify_ready(&self.inner.tables, |tables| {
            reconcile::remove(tables, id);
        });
        modify_ready(&self.inner.zones, |zones| {
            reconcile::remove_table_from_zones(zones, id)
        });
        Ok(())
    }

    /// Re-read one table and patch it everywhere it is shown
    pub async fn refresh_table(&self, id: i64) -> ClientResult<DiningTable> {
        let mut table = self.fetch_table(id).await?;
        self.fill_zone(&mut table, None);
        self.apply_table(&table);
        Ok(table)
    }

    async fn refresh_tables(&self, ids: impl IntoIterator<Item = Option<i64>>) {
        let ids: BTreeSet<i64> = ids.into_iter().flatten().collect();
        for id in ids {
            // Already reported; the mutation itself went through
            let _ = self.refresh_table(id).await;
        }
    }

    fn apply_table(&self, table: &DiningTable) {
        modify_ready(&self.inner.tables, |tables| {
            reconcile::upsert(tables, table.clone())
        });
        modify_ready(&self.inner.zones, |zones| reconcile::place_table(zones, table));
    }

    /// The backend may omit the zone reference; fall back to what we know
    fn fill_zone(&self, table: &mut DiningTable, zone_hint: Option<i64>) {
        if table.zone.is_some() {
            return;
        }
        let known = self
            .inner
            .tables
            .borrow()
            .ready()
            .and_then(|tables| tables.iter().find(|t| t.id == table.id))
            .and_then(|t| t.zone.clone());

        table.zone = match (zone_hint, known) {
            (Some(id), Some(known)) if known.id == id => Some(known),
            (Some(id), _) => Some(self.zone_ref(id)),
            (None, known) => known,
        };
    }

    fn zone_ref(&self, id: i64) -> ZoneRef {
        self.inner
            .zones
            .borrow()
            .ready()
            .and_then(|zones| zones.iter().find(|z| z.id == id))
            .map(Zone::reference)
            .unwrap_or(ZoneRef {
                id,
                name: String::new(),
            })
    }

    // ========== Customer mutations ==========

    /// POST /customer; with `table_id` the customer is seated in the same call
    pub async fn create_customer(&self, payload: &CustomerCreate) -> ClientResult<Customer> {
        let customer = self.report(
            "Create customer",
            self.inner.customer_api.create(payload).await,
        )?;

        tracing::info!(customer_id = customer.id, table_id = ?payload.table_id, "Customer created");
        modify_ready(&self.inner.customers, |customers| {
            reconcile::upsert(customers, customer.clone())
        });
        self.refresh_tables([payload.table_id, customer.table.as_ref().map(|t| t.id)])
            .await;
        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        id: i64,
        payload: &CustomerUpdate,
    ) -> ClientResult<Customer> {
        let previous_table = self.seated_table_of(id);
        let customer = self.report(
            "Update customer",
            self.inner.customer_api.update(id, payload).await,
        )?;

        tracing::info!(customer_id = id, "Customer updated");
        modify_ready(&self.inner.customers, |customers| {
            reconcile::upsert(customers, customer.clone())
        });
        if payload.table_id.is_some() || previous_table != customer.table.as_ref().map(|t| t.id) {
            self.refresh_tables([
                previous_table,
                payload.table_id,
                customer.table.as_ref().map(|t| t.id),
            ])
            .await;
        }
        Ok(customer)
    }

    /// PATCH /customer/{id}/assign-table
    pub async fn assign_table(&self, customer_id: i64, table_id: i64) -> ClientResult<Customer> {
        let previous_table = self.seated_table_of(customer_id);
        let customer = self.report(
            "Assign table",
            self.inner
                .customer_api
                .assign_table(customer_id, &AssignTable { table_id })
                .await,
        )?;

        tracing::info!(customer_id, table_id, "Table assigned");
        modify_ready(&self.inner.customers, |customers| {
            reconcile::upsert(customers, customer.clone())
        });
        self.refresh_tables([previous_table, Some(table_id)]).await;
        Ok(customer)
    }

    /// PATCH /customer/{id}/leave - the customer's table becomes free
    pub async fn customer_leave(&self, customer_id: i64) -> ClientResult<()> {
        let seated_at = self.seated_table_of(customer_id);
        self.report(
            "Customer leave",
            self.inner.customer_api.leave(customer_id).await,
        )?;

        tracing::info!(customer_id, table_id = ?seated_at, "Customer left");
        modify_ready(&self.inner.customers, |customers| {
            if let Some(c) = customers.iter_mut().find(|c| c.id == customer_id) {
                c.table = None;
            }
        });
        self.refresh_tables([seated_at]).await;
        Ok(())
    }

    pub async fn delete_customer(&self, id: i64) -> ClientResult<()> {
        let seated_at = self.seated_table_of(id);
        self.report(
            "Delete customer",
            self.inner.customer_api.delete(id).await,
        )?;

        tracing::info!(customer_id = id, "Customer deleted");
        modify_ready(&self.inner.customers, |customers| {
            reconcile::remove(customers, id);
        });
        self.refresh_tables([seated_at]).await;
        Ok(())
    }

    /// Table the customer sits at, according to local copies
    fn seated_table_of(&self, customer_id: i64) -> Option<i64> {
        let from_customers = self
            .inner
            .customers
            .borrow()
            .ready()
            .and_then(|customers| customers.iter().find(|c| c.id == customer_id))
            .and_then(|c| c.table.as_ref().map(|t| t.id));

        from_customers.or_else(|| {
            self.inner
                .tables
                .borrow()
                .ready()
                .and_then(|tables| {
                    tables
                        .iter()
                        .find(|t| t.customer().is_some_and(|c| c.id == customer_id))
                })
                .map(|t| t.id)
        })
    }

    // ========== Failure reporting ==========

    fn report<T>(&self, action: &str, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(e) = &result {
            tracing::error!(action, error = %e, "Floor action failed");
            self.inner.notifications.from_error(action, e);
        }
        result
    }
}

/// Patch a collection only if it has been loaded
fn modify_ready<T>(slot: &watch::Sender<Collection<T>>, f: impl FnOnce(&mut Vec<T>)) {
    slot.send_if_modified(|state| match state {
        LoadState::Ready(items) => {
            f(items);
            true
        }
        _ => false,
    });
}
