//! Zone Model

use serde::{Deserialize, Serialize};

use super::{DiningTable, Occupancy};

/// Zone entity (dining area: hall, patio, private room...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    /// Only populated when the backend embeds the zone's tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<DiningTable>>,
}

impl Zone {
    /// Occupancy computed from the embedded tables (all zero when absent)
    pub fn occupancy(&self) -> Occupancy {
        self.tables
            .as_deref()
            .map(Occupancy::of)
            .unwrap_or_default()
    }

    pub fn reference(&self) -> ZoneRef {
        ZoneRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Lightweight zone reference embedded in a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRef {
    pub id: i64,
    pub name: String,
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub name: String,
}

/// Update zone payload (rename only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub name: String,
}

/// Per-zone availability as reported by `GET /zone/statistics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStatistics {
    pub zone: String,
    pub available_tables: u32,
}
