//! In-process mock of the floor backend
//!
//! Keeps zones, tables and customers in memory and answers the same REST
//! routes as the real backend. It is deliberately permissive: a table can
//! be assigned twice and nothing is validated beyond what the tests need.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use floor_client::{ClientConfig, FloorStore};
use serde_json::{Value, json};

type ApiResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;
type Shared = Arc<Mutex<Backend>>;

#[derive(Debug, Clone)]
struct ZoneRow {
    id: i64,
    name: String,
}

#[derive(Debug, Clone)]
struct TableRow {
    id: i64,
    name: String,
    capacity: u32,
    zone_id: i64,
    customer_id: Option<i64>,
}

#[derive(Debug, Clone)]
struct CustomerRow {
    id: i64,
    name: String,
    phone: String,
    table_id: Option<i64>,
}

/// A body-carrying request the backend received
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

#[derive(Default)]
struct Backend {
    next_id: i64,
    zones: Vec<ZoneRow>,
    tables: Vec<TableRow>,
    customers: Vec<CustomerRow>,
    requests: Vec<Recorded>,
    fail_status: Option<u16>,
    delay: Option<Duration>,
}

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, method: &'static str, path: String, body: &Value) {
        self.requests.push(Recorded {
            method,
            path,
            body: body.clone(),
        });
    }

    fn zone_json(&self, zone: &ZoneRow, with_tables: bool) -> Value {
        let mut value = json!({ "id": zone.id, "name": zone.name });
        if with_tables {
            let tables: Vec<Value> = self
                .tables
                .iter()
                .filter(|t| t.zone_id == zone.id)
                .map(|t| self.table_json(t))
                .collect();
            value["tables"] = Value::Array(tables);
        }
        value
    }

    fn table_json(&self, table: &TableRow) -> Value {
        let customer = table
            .customer_id
            .and_then(|id| self.customers.iter().find(|c| c.id == id))
            .map(|c| json!({ "id": c.id, "name": c.name, "phone": c.phone }));
        let zone = self
            .zones
            .iter()
            .find(|z| z.id == table.zone_id)
            .map(|z| json!({ "id": z.id, "name": z.name }));
        json!({
            "id": table.id,
            "name": table.name,
            "capacity": table.capacity,
            "isAvailable": table.customer_id.is_none(),
            "customer": customer,
            "zone": zone,
        })
    }

    fn customer_json(&self, customer: &CustomerRow) -> Value {
        let table = customer
            .table_id
            .and_then(|id| self.tables.iter().find(|t| t.id == id))
            .map(|t| json!({ "id": t.id, "name": t.name }));
        json!({
            "id": customer.id,
            "name": customer.name,
            "phone": customer.phone,
            "table": table,
        })
    }

    fn zone(&self, id: i64) -> Result<&ZoneRow, (StatusCode, Json<Value>)> {
        self.zones
            .iter()
            .find(|z| z.id == id)
            .ok_or_else(|| not_found("Zone", id))
    }

    fn table_mut(&mut self, id: i64) -> Result<&mut TableRow, (StatusCode, Json<Value>)> {
        self.tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Table", id))
    }

    fn customer_mut(&mut self, id: i64) -> Result<&mut CustomerRow, (StatusCode, Json<Value>)> {
        self.customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Customer", id))
    }

    fn free_table(&mut self, table_id: Option<i64>) {
        if let Some(table) = table_id.and_then(|id| self.tables.iter_mut().find(|t| t.id == id)) {
            table.customer_id = None;
        }
    }

    fn seat(&mut self, customer_id: i64, table_id: i64) -> Result<(), (StatusCode, Json<Value>)> {
        self.table_mut(table_id)?.customer_id = Some(customer_id);
        let previous = self.customer_mut(customer_id)?.table_id.replace(table_id);
        if previous != Some(table_id) {
            self.free_table(previous);
        }
        Ok(())
    }
}

fn not_found(what: &str, id: i64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{what} {id} not found") })),
    )
}

fn bad_request(messages: &[&str]) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": messages, "error": "Bad Request" })),
    )
}

fn lock(state: &Shared) -> MutexGuard<'_, Backend> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn ok(value: Value) -> ApiResult {
    Ok((StatusCode::OK, Json(value)))
}

fn created(value: Value) -> ApiResult {
    Ok((StatusCode::CREATED, Json(value)))
}

fn text(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

// ========== Zones ==========

async fn list_zones(State(state): State<Shared>) -> ApiResult {
    let b = lock(&state);
    ok(b.zones.iter().map(|z| b.zone_json(z, true)).collect())
}

async fn create_zone(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    let mut b = lock(&state);
    b.record("POST", "/zone".into(), &body);
    let name = text(&body, "name").filter(|n| !n.trim().is_empty());
    let Some(name) = name else {
        return Err(bad_request(&["name should not be empty"]));
    };
    let id = b.next_id();
    b.zones.push(ZoneRow { id, name });
    let zone = b.zone(id)?.clone();
    created(b.zone_json(&zone, false))
}

async fn zone_statistics(State(state): State<Shared>) -> ApiResult {
    let b = lock(&state);
    ok(b.zones
        .iter()
        .map(|z| {
            let free = b
                .tables
                .iter()
                .filter(|t| t.zone_id == z.id && t.customer_id.is_none())
                .count();
            json!({ "zone": z.name, "availableTables": free })
        })
        .collect())
}

async fn get_zone(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let b = lock(&state);
    let zone = b.zone(id)?;
    ok(b.zone_json(zone, true))
}

async fn zone_tables(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let b = lock(&state);
    b.zone(id)?;
    ok(b.tables
        .iter()
        .filter(|t| t.zone_id == id)
        .map(|t| b.table_json(t))
        .collect())
}

async fn update_zone(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut b = lock(&state);
    b.record("PATCH", format!("/zone/{id}"), &body);
    let zone = b
        .zones
        .iter_mut()
        .find(|z| z.id == id)
        .ok_or_else(|| not_found("Zone", id))?;
    if let Some(name) = text(&body, "name") {
        zone.name = name;
    }
    let zone = zone.clone();
    ok(b.zone_json(&zone, false))
}

async fn delete_zone(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut b = lock(&state);
    b.zone(id)?;
    b.zones.retain(|z| z.id != id);
    let removed: Vec<i64> = b
        .tables
        .iter()
        .filter(|t| t.zone_id == id)
        .map(|t| t.id)
        .collect();
    b.tables.retain(|t| t.zone_id != id);
    for c in b.customers.iter_mut() {
        if c.table_id.is_some_and(|t| removed.contains(&t)) {
            c.table_id = None;
        }
    }
    ok(json!({}))
}

// ========== Tables ==========

async fn list_tables(State(state): State<Shared>) -> ApiResult {
    let b = lock(&state);
    ok(b.tables.iter().map(|t| b.table_json(t)).collect())
}

async fn available_tables(State(state): State<Shared>) -> ApiResult {
    let b = lock(&state);
    ok(b.tables
        .iter()
        .filter(|t| t.customer_id.is_none())
        .map(|t| b.table_json(t))
        .collect())
}

async fn get_table(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut b = lock(&state);
    let table = b.table_mut(id)?.clone();
    ok(b.table_json(&table))
}

async fn create_table(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    let mut b = lock(&state);
    b.record("POST", "/table".into(), &body);
    let zone_id = body.get("zoneId").and_then(Value::as_i64).unwrap_or_default();
    b.zone(zone_id)?;
    let (Some(name), Some(capacity)) = (
        text(&body, "name"),
        body.get("capacity").and_then(Value::as_u64),
    ) else {
        return Err(bad_request(&["name must be a string", "capacity must be a number"]));
    };
    let id = b.next_id();
    let table = TableRow {
        id,
        name,
        capacity: capacity as u32,
        zone_id,
        customer_id: None,
    };
    b.tables.push(table.clone());
    created(b.table_json(&table))
}

async fn update_table(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut b = lock(&state);
    b.record("PATCH", format!("/table/{id}"), &body);
    let table = b.table_mut(id)?;
    if let Some(name) = text(&body, "name") {
        table.name = name;
    }
    if let Some(capacity) = body.get("capacity").and_then(Value::as_u64) {
        table.capacity = capacity as u32;
    }
    if let Some(zone_id) = body.get("zoneId").and_then(Value::as_i64) {
        table.zone_id = zone_id;
    }
    let freed = match body.get("isAvailable").and_then(Value::as_bool) {
        Some(true) => table.customer_id.take(),
        _ => None,
    };
    let table = table.clone();
    if let Some(customer) = freed.and_then(|c| b.customers.iter_mut().find(|x| x.id == c)) {
        customer.table_id = None;
    }
    ok(b.table_json(&table))
}

async fn delete_table(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut b = lock(&state);
    b.table_mut(id)?;
    b.tables.retain(|t| t.id != id);
    for c in b.customers.iter_mut().filter(|c| c.table_id == Some(id)) {
        c.table_id = None;
    }
    ok(json!({}))
}

// ========== Customers ==========

async fn list_customers(State(state): State<Shared>) -> ApiResult {
    let b = lock(&state);
    ok(b.customers.iter().map(|c| b.customer_json(c)).collect())
}

async fn get_customer(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut b = lock(&state);
    let customer = b.customer_mut(id)?.clone();
    ok(b.customer_json(&customer))
}

async fn create_customer(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    let mut b = lock(&state);
    b.record("POST", "/customer".into(), &body);
    let (Some(name), Some(phone)) = (text(&body, "name"), text(&body, "phone")) else {
        return Err(bad_request(&["name must be a string", "phone must be a string"]));
    };
    let table_id = body.get("tableId").and_then(Value::as_i64);
    if let Some(table_id) = table_id {
        b.table_mut(table_id)?;
    }

    let id = b.next_id();
    b.customers.push(CustomerRow {
        id,
        name,
        phone,
        table_id: None,
    });
    if let Some(table_id) = table_id {
        b.seat(id, table_id)?;
    }
    let customer = b.customer_mut(id)?.clone();
    created(b.customer_json(&customer))
}

async fn update_customer(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut b = lock(&state);
    b.record("PATCH", format!("/customer/{id}"), &body);
    let customer = b.customer_mut(id)?;
    if let Some(name) = text(&body, "name") {
        customer.name = name;
    }
    if let Some(phone) = text(&body, "phone") {
        customer.phone = phone;
    }
    if let Some(table_id) = body.get("tableId").and_then(Value::as_i64) {
        b.seat(id, table_id)?;
    }
    let customer = b.customer_mut(id)?.clone();
    ok(b.customer_json(&customer))
}

async fn assign_table(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut b = lock(&state);
    b.record("PATCH", format!("/customer/{id}/assign-table"), &body);
    let Some(table_id) = body.get("tableId").and_then(Value::as_i64) else {
        return Err(bad_request(&["tableId must be a number"]));
    };
    b.seat(id, table_id)?;
    let customer = b.customer_mut(id)?.clone();
    ok(b.customer_json(&customer))
}

async fn customer_leave(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut b = lock(&state);
    let previous = b.customer_mut(id)?.table_id.take();
    // Only free the table if this customer still holds it
    if let Some(table) = previous.and_then(|t| b.tables.iter_mut().find(|x| x.id == t)) {
        if table.customer_id == Some(id) {
            table.customer_id = None;
        }
    }
    ok(json!({}))
}

async fn delete_customer(State(state): State<Shared>, Path(id): Path<i64>) -> ApiResult {
    let mut b = lock(&state);
    let previous = b.customer_mut(id)?.table_id;
    b.free_table(previous);
    b.customers.retain(|c| c.id != id);
    ok(json!({}))
}

/// Injected latency and forced failures
async fn chaos(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let (fail_status, delay) = {
        let b = lock(&state);
        (b.fail_status, b.delay)
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(status) = fail_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(json!({ "message": "Backend unavailable" }))).into_response();
    }
    next.run(request).await
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/zone", get(list_zones).post(create_zone))
        .route("/zone/statistics", get(zone_statistics))
        .route(
            "/zone/{id}",
            get(get_zone).patch(update_zone).delete(delete_zone),
        )
        .route("/zone/{id}/tables", get(zone_tables))
        .route("/table", get(list_tables).post(create_table))
        .route("/table/available", get(available_tables))
        .route(
            "/table/{id}",
            get(get_table).patch(update_table).delete(delete_table),
        )
        .route("/customer", get(list_customers).post(create_customer))
        .route(
            "/customer/{id}",
            get(get_customer)
                .patch(update_customer)
                .delete(delete_customer),
        )
        .route("/customer/{id}/assign-table", patch(assign_table))
        .route("/customer/{id}/leave", patch(customer_leave))
        .layer(middleware::from_fn_with_state(state.clone(), chaos))
        .with_state(state)
}

pub struct MockBackend {
    pub base_url: String,
    state: Shared,
}

impl MockBackend {
    pub async fn start() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("floor_client=debug")
            .with_test_writer()
            .try_init();

        let state: Shared = Arc::new(Mutex::new(Backend::default()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// A fresh store session against this backend
    pub fn store(&self) -> FloorStore {
        FloorStore::connect(&ClientConfig::new(&self.base_url).with_timeout(5)).unwrap()
    }

    pub fn seed_zone(&self, name: &str) -> i64 {
        let mut b = lock(&self.state);
        let id = b.next_id();
        b.zones.push(ZoneRow {
            id,
            name: name.into(),
        });
        id
    }

    pub fn seed_table(&self, zone_id: i64, name: &str, capacity: u32) -> i64 {
        let mut b = lock(&self.state);
        let id = b.next_id();
        b.tables.push(TableRow {
            id,
            name: name.into(),
            capacity,
            zone_id,
            customer_id: None,
        });
        id
    }

    pub fn seed_customer(&self, name: &str, phone: &str, table_id: Option<i64>) -> i64 {
        let mut b = lock(&self.state);
        let id = b.next_id();
        b.customers.push(CustomerRow {
            id,
            name: name.into(),
            phone: phone.into(),
            table_id: None,
        });
        if let Some(table_id) = table_id {
            b.seat(id, table_id).unwrap();
        }
        id
    }

    /// Answer every request with this status until reset with `None`
    pub fn fail_with(&self, status: Option<u16>) {
        lock(&self.state).fail_status = status;
    }

    pub fn delay(&self, delay: Option<Duration>) {
        lock(&self.state).delay = delay;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        lock(&self.state).requests.clone()
    }

    pub fn zone_count(&self) -> usize {
        lock(&self.state).zones.len()
    }

    pub fn table_occupant(&self, table_id: i64) -> Option<i64> {
        lock(&self.state)
            .tables
            .iter()
            .find(|t| t.id == table_id)
            .and_then(|t| t.customer_id)
    }
}
