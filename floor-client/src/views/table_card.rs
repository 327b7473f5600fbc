//! Table card: inline edit, delete, seating and freeing a table

use shared::models::{Customer, DiningTable, DiningTableUpdate};

use super::{AddCustomerForm, KeyedCard, parse_capacity, reject, required};
use crate::{ClientError, ClientResult, FloorStore, HttpClient};

/// Editable fields of a table, as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDraft {
    pub name: String,
    pub capacity: String,
}

impl TableDraft {
    pub fn from_table(table: &DiningTable) -> Self {
        Self {
            name: table.name.clone(),
            capacity: table.capacity.to_string(),
        }
    }

    /// Checked update payload, or the message to show
    pub fn to_update(&self) -> Result<DiningTableUpdate, &'static str> {
        let name = required(&self.name).ok_or("Table name is required")?;
        let capacity =
            parse_capacity(&self.capacity).ok_or("Capacity must be a whole number of at least 1")?;
        Ok(DiningTableUpdate {
            name: Some(name.to_string()),
            capacity: Some(capacity),
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct TableCard {
    table: DiningTable,
    draft: Option<TableDraft>,
    confirming_delete: bool,
    seat_form: Option<AddCustomerForm>,
}

impl TableCard {
    pub fn new(table: DiningTable) -> Self {
        Self {
            table,
            draft: None,
            confirming_delete: false,
            seat_form: None,
        }
    }

    pub fn table(&self) -> &DiningTable {
        &self.table
    }

    // ========== Inline edit ==========

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&TableDraft> {
        self.draft.as_ref()
    }

    pub fn start_edit(&mut self) {
        self.draft = Some(TableDraft::from_table(&self.table));
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.name = name.into();
        }
    }

    pub fn set_capacity(&mut self, capacity: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.capacity = capacity.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// PATCH `{name, capacity}`; leaves edit mode only on success
    pub async fn save<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<()> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(ClientError::invalid_state("Table card is not being edited"));
        };
        let update = draft
            .to_update()
            .map_err(|message| reject(store, "Update table", message))?;

        self.table = store.update_table(self.table.id, &update).await?;
        self.draft = None;
        Ok(())
    }

    // ========== Delete ==========

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn request_delete(&mut self) {
        self.confirming_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    pub async fn confirm_delete<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<()> {
        if !self.confirming_delete {
            return Err(ClientError::invalid_state("Table deletion was not requested"));
        }
        store.delete_table(self.table.id).await?;
        self.confirming_delete = false;
        Ok(())
    }

    // ========== Seating ==========

    /// Open the seat-customer form; only vacant tables take a customer
    pub async fn open_seat_form<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<()> {
        if !self.table.is_available() {
            return Err(ClientError::invalid_state(format!(
                "Table {} is already occupied",
                self.table.name
            )));
        }
        let form = self.seat_form.insert(AddCustomerForm::new(self.table.id));
        form.open(store).await
    }

    pub fn seat_form(&self) -> Option<&AddCustomerForm> {
        self.seat_form.as_ref()
    }

    pub fn seat_form_mut(&mut self) -> Option<&mut AddCustomerForm> {
        self.seat_form.as_mut()
    }

    pub fn close_seat_form(&mut self) {
        self.seat_form = None;
    }

    /// Seat the customer chosen in the form; the form goes away on success
    pub async fn submit_seat_form<C: HttpClient>(
        &mut self,
        store: &FloorStore<C>,
    ) -> ClientResult<Customer> {
        let Some(form) = self.seat_form.as_mut() else {
            return Err(ClientError::invalid_state("Seat form is not open"));
        };
        let customer = form.submit(store).await?;
        self.seat_form = None;
        Ok(customer)
    }

    /// The seated customer leaves and the table becomes vacant
    pub async fn return_table<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<()> {
        let Some(customer) = self.table.customer() else {
            return Err(ClientError::invalid_state(format!(
                "No customer is seated at table {}",
                self.table.name
            )));
        };
        store.customer_leave(customer.id).await
    }
}

impl KeyedCard for TableCard {
    type Item = DiningTable;

    fn from_item(item: DiningTable) -> Self {
        Self::new(item)
    }

    fn key(&self) -> i64 {
        self.table.id
    }

    fn item_key(item: &DiningTable) -> i64 {
        item.id
    }

    fn refresh(&mut self, item: DiningTable) {
        // A table that got occupied meanwhile cannot take another customer
        if !item.is_available() {
            self.seat_form = None;
        }
        self.table = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CustomerRef, TableState};

    fn table(available: bool) -> DiningTable {
        DiningTable {
            id: 5,
            name: "T5".into(),
            capacity: 4,
            zone: None,
            state: if available {
                TableState::Vacant
            } else {
                TableState::Occupied {
                    customer: Some(CustomerRef {
                        id: 1,
                        name: "An".into(),
                        phone: "0901".into(),
                    }),
                }
            },
        }
    }

    #[test]
    fn test_draft_seeded_from_table() {
        let mut card = TableCard::new(table(true));
        card.start_edit();

        let draft = card.draft().unwrap();
        assert_eq!(draft.name, "T5");
        assert_eq!(draft.capacity, "4");

        card.set_capacity("6");
        card.set_name("Window");
        let update = card.draft().unwrap().to_update().unwrap();
        assert_eq!(update.capacity, Some(6));
        assert_eq!(update.name.as_deref(), Some("Window"));
        assert!(update.zone_id.is_none());
        assert!(update.is_available.is_none());
    }

    #[test]
    fn test_draft_validation() {
        let draft = TableDraft {
            name: "  ".into(),
            capacity: "4".into(),
        };
        assert_eq!(draft.to_update(), Err("Table name is required"));

        let draft = TableDraft {
            name: "T1".into(),
            capacity: "abc".into(),
        };
        assert!(draft.to_update().is_err());

        let draft = TableDraft {
            name: "T1".into(),
            capacity: "0".into(),
        };
        assert!(draft.to_update().is_err());
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        let mut card = TableCard::new(table(true));
        card.start_edit();
        card.set_name("Changed");
        card.cancel_edit();

        assert!(!card.is_editing());
        assert_eq!(card.table().name, "T5");
    }

    #[test]
    fn test_refresh_closes_seat_form_when_occupied() {
        let mut card = TableCard::new(table(true));
        card.seat_form = Some(AddCustomerForm::new(5));

        card.refresh(table(false));

        assert!(card.seat_form().is_none());
        assert!(!card.table().is_available());
    }
}
