//! Customer Model

use serde::{Deserialize, Serialize};

use super::TableRef;

/// Customer entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// Table the customer currently occupies
    #[serde(default)]
    pub table: Option<TableRef>,
}

impl Customer {
    pub fn is_seated(&self) -> bool {
        self.table.is_some()
    }

    /// Case-insensitive substring match on name or phone.
    ///
    /// An empty term matches every customer; whitespace is significant.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term) || self.phone.to_lowercase().contains(&term)
    }
}

/// Customer as embedded in a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Create customer payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
}

/// Update customer payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i64>,
}

/// Seat a customer at a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTable {
    pub table_id: i64,
}
