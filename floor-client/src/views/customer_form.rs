//! Seat-customer form: a brand new customer, or one already known but not seated

use shared::models::{Customer, CustomerCreate};

use super::{reject, required};
use crate::{ClientError, ClientResult, FloorStore, HttpClient, LoadState};

/// Case-insensitive substring filter over name and phone
pub fn filter_customers<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    customers.iter().filter(|c| c.matches(term)).collect()
}

/// Customers not seated at any table
pub fn unseated(customers: &[Customer]) -> Vec<Customer> {
    customers.iter().filter(|c| !c.is_seated()).cloned().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerFormMode {
    /// Create the customer and seat them in one call
    #[default]
    New,
    /// Pick an unseated customer and assign the table
    Existing,
}

#[derive(Debug, Clone)]
pub struct AddCustomerForm {
    table_id: i64,
    mode: CustomerFormMode,
    name: String,
    phone: String,
    candidates: LoadState<Vec<Customer>>,
    search: String,
    selected: Option<i64>,
    open: bool,
    submitting: bool,
    last_error: Option<String>,
}

impl AddCustomerForm {
    pub fn new(table_id: i64) -> Self {
        Self {
            table_id,
            mode: CustomerFormMode::default(),
            name: String::new(),
            phone: String::new(),
            candidates: LoadState::Idle,
            search: String::new(),
            selected: None,
            open: true,
            submitting: false,
            last_error: None,
        }
    }

    pub fn table_id(&self) -> i64 {
        self.table_id
    }

    /// Load the customers that can be picked in `Existing` mode
    pub async fn open<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<()> {
        self.open = true;
        self.candidates = LoadState::Loading;
        match store.load_customers().await {
            Ok(()) => {
                let free = store.customers().ready().map(|c| unseated(c)).unwrap_or_default();
                self.candidates = LoadState::Ready(free);
                Ok(())
            }
            Err(e) => {
                self.candidates = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ========== Fields ==========

    pub fn mode(&self) -> CustomerFormMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CustomerFormMode) {
        self.mode = mode;
        self.last_error = None;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    // ========== Existing customer ==========

    pub fn candidates(&self) -> &LoadState<Vec<Customer>> {
        &self.candidates
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn filtered_candidates(&self) -> Vec<&Customer> {
        match &self.candidates {
            LoadState::Ready(customers) => filter_customers(customers, &self.search),
            _ => Vec::new(),
        }
    }

    /// Select a candidate by id; ids outside the candidate list are ignored
    pub fn select(&mut self, customer_id: i64) -> bool {
        let known = self
            .candidates
            .ready()
            .is_some_and(|c| c.iter().any(|c| c.id == customer_id));
        if known {
            self.selected = Some(customer_id);
        }
        known
    }

    pub fn selected(&self) -> Option<&Customer> {
        let id = self.selected?;
        self.candidates.ready()?.iter().find(|c| c.id == id)
    }

    // ========== Submit ==========

    /// Seat the customer; the form closes only on success
    pub async fn submit<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<Customer> {
        if !self.open {
            return Err(ClientError::invalid_state("Customer form is not open"));
        }

        self.submitting = true;
        let result = match self.mode {
            CustomerFormMode::New => self.create_and_seat(store).await,
            CustomerFormMode::Existing => self.seat_selected(store).await,
        };
        self.submitting = false;

        match &result {
            Ok(customer) => {
                tracing::debug!(customer_id = customer.id, table_id = self.table_id, "Customer seated");
                self.last_error = None;
                self.open = false;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }

    async fn create_and_seat<C: HttpClient>(&self, store: &FloorStore<C>) -> ClientResult<Customer> {
        let (Some(name), Some(phone)) = (required(&self.name), required(&self.phone)) else {
            return Err(reject(store, "Create customer", "Name and phone are required"));
        };
        store
            .create_customer(&CustomerCreate {
                name: name.to_string(),
                phone: phone.to_string(),
                table_id: Some(self.table_id),
            })
            .await
    }

    async fn seat_selected<C: HttpClient>(&self, store: &FloorStore<C>) -> ClientResult<Customer> {
        let Some(customer) = self.selected() else {
            return Err(reject(store, "Assign table", "Select a customer first"));
        };
        store.assign_table(customer.id, self.table_id).await
    }
}
