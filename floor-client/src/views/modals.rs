//! Table dialogs on the zone detail page

use shared::models::{CustomerRef, DiningTable, DiningTableCreate};

use super::{DEFAULT_CAPACITY, TableDraft, reject};
use crate::{ClientError, ClientResult, FloorStore, HttpClient};

/// Open/submitting/error bookkeeping shared by the editable dialogs
#[derive(Debug, Clone)]
struct DialogState {
    open: bool,
    submitting: bool,
    last_error: Option<String>,
}

impl DialogState {
    fn new() -> Self {
        Self {
            open: true,
            submitting: false,
            last_error: None,
        }
    }

    /// Run one submission; closes on success, records the error otherwise
    async fn run<T>(
        &mut self,
        request: impl Future<Output = ClientResult<T>>,
    ) -> ClientResult<T> {
        if !self.open {
            return Err(ClientError::invalid_state("Dialog is closed"));
        }
        self.submitting = true;
        let result = request.await;
        self.submitting = false;

        match &result {
            Ok(_) => {
                self.open = false;
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }
}

// ========== Add table ==========

#[derive(Debug, Clone)]
pub struct AddTableModal {
    zone_id: i64,
    pub draft: TableDraft,
    state: DialogState,
}

impl AddTableModal {
    pub fn new(zone_id: i64) -> Self {
        Self {
            zone_id,
            draft: TableDraft {
                name: String::new(),
                capacity: DEFAULT_CAPACITY.to_string(),
            },
            state: DialogState::new(),
        }
    }

    pub fn zone_id(&self) -> i64 {
        self.zone_id
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    pub async fn submit<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<DiningTable> {
        let update = match self.draft.to_update() {
            Ok(update) => update,
            Err(message) => {
                self.state.last_error = Some(message.to_string());
                return Err(reject(store, "Create table", message));
            }
        };
        let payload = DiningTableCreate {
            name: update.name.unwrap_or_default(),
            capacity: update.capacity.unwrap_or(DEFAULT_CAPACITY),
            zone_id: self.zone_id,
        };
        self.state.run(store.create_table(&payload)).await
    }
}

// ========== Edit table ==========

#[derive(Debug, Clone)]
pub struct EditTableModal {
    table_id: i64,
    pub draft: TableDraft,
    state: DialogState,
}

impl EditTableModal {
    pub fn new(table: &DiningTable) -> Self {
        Self {
            table_id: table.id,
            draft: TableDraft::from_table(table),
            state: DialogState::new(),
        }
    }

    pub fn table_id(&self) -> i64 {
        self.table_id
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    pub async fn submit<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<DiningTable> {
        let update = match self.draft.to_update() {
            Ok(update) => update,
            Err(message) => {
                self.state.last_error = Some(message.to_string());
                return Err(reject(store, "Update table", message));
            }
        };
        self.state.run(store.update_table(self.table_id, &update)).await
    }
}

// ========== Details ==========

/// Read-only view of one table
#[derive(Debug, Clone)]
pub struct TableDetailModal {
    table: DiningTable,
}

impl TableDetailModal {
    pub fn new(table: DiningTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &DiningTable {
        &self.table
    }

    /// Label/value rows in display order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Name", self.table.name.clone()),
            ("Capacity", format!("{} seats", self.table.capacity)),
            ("Status", self.table.status_label().to_string()),
        ];
        if let Some(zone) = &self.table.zone {
            rows.push(("Zone", zone.name.clone()));
        }
        rows
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        self.table.customer()
    }
}
