//! Dining Table Model

use serde::{Deserialize, Serialize};

use super::{CustomerRef, ZoneRef};

/// Seating state of a table
///
/// A vacant table can never carry a customer. An occupied table usually
/// does, but the backend may also mark a table occupied by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    Vacant,
    Occupied { customer: Option<CustomerRef> },
}

/// Dining table entity
///
/// Serialized as `{id, name, capacity, isAvailable, customer, zone}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DiningTableWire", into = "DiningTableWire")]
pub struct DiningTable {
    pub id: i64,
    pub name: String,
    pub capacity: u32,
    pub zone: Option<ZoneRef>,
    pub state: TableState,
}

impl DiningTable {
    pub fn is_available(&self) -> bool {
        matches!(self.state, TableState::Vacant)
    }

    /// Customer currently seated, if the backend reported one
    pub fn customer(&self) -> Option<&CustomerRef> {
        match &self.state {
            TableState::Occupied { customer } => customer.as_ref(),
            TableState::Vacant => None,
        }
    }

    pub fn zone_id(&self) -> Option<i64> {
        self.zone.as_ref().map(|z| z.id)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_available() { "Vacant" } else { "Occupied" }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiningTableWire {
    id: i64,
    name: String,
    capacity: u32,
    is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    customer: Option<CustomerRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zone: Option<ZoneRef>,
}

impl From<DiningTableWire> for DiningTable {
    fn from(wire: DiningTableWire) -> Self {
        let state = if wire.is_available {
            if let Some(customer) = &wire.customer {
                // Availability flag wins; the backend contract is unclear here
                tracing::warn!(
                    table_id = wire.id,
                    customer_id = customer.id,
                    "Table reported available with a seated customer"
                );
            }
            TableState::Vacant
        } else {
            TableState::Occupied {
                customer: wire.customer,
            }
        };

        Self {
            id: wire.id,
            name: wire.name,
            capacity: wire.capacity,
            zone: wire.zone,
            state,
        }
    }
}

impl From<DiningTable> for DiningTableWire {
    fn from(table: DiningTable) -> Self {
        let (is_available, customer) = match table.state {
            TableState::Vacant => (true, None),
            TableState::Occupied { customer } => (false, customer),
        };

        Self {
            id: table.id,
            name: table.name,
            capacity: table.capacity,
            is_available,
            customer,
            zone: table.zone,
        }
    }
}

/// Lightweight table reference embedded in a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub id: i64,
    pub name: String,
}

/// Create dining table payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    pub name: String,
    pub capacity: u32,
    pub zone_id: i64,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
