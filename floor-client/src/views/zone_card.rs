//! Zone card: one zone with its occupancy, inline rename and delete

use shared::models::{Occupancy, Zone};

use super::{KeyedCard, reject, required};
use crate::{ClientError, ClientResult, FloorStore, HttpClient};

#[derive(Debug, Clone)]
pub struct ZoneCard {
    zone: Zone,
    /// Name being edited; `None` when not in edit mode
    draft: Option<String>,
    confirming_delete: bool,
}

impl ZoneCard {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            draft: None,
            confirming_delete: false,
        }
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Occupancy from the zone's embedded tables
    pub fn stats(&self) -> Occupancy {
        self.zone.occupancy()
    }

    /// Usage bar width; zero when the zone has no tables
    pub fn usage_percent(&self) -> u8 {
        self.stats().usage_percent()
    }

    /// Page to open when the card is clicked
    pub fn route(&self) -> String {
        format!("/zones/{}", self.zone.id)
    }

    // ========== Rename ==========

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn start_edit(&mut self) {
        self.draft = Some(self.zone.name.clone());
    }

    pub fn set_draft(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            *draft = name.into();
        }
    }

    /// Leave edit mode, discarding the draft
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// PATCH the new name; stays in edit mode if it fails
    pub async fn save<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<()> {
        let Some(draft) = self.draft.as_deref() else {
            return Err(ClientError::invalid_state("Zone card is not being edited"));
        };
        let Some(name) = required(draft) else {
            return Err(reject(store, "Rename zone", "Zone name is required"));
        };

        let zone = store.rename_zone(self.zone.id, name).await?;
        self.zone.name = zone.name;
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

    /// Delete after confirmation; the dialog stays up if the request fails
    pub async fn confirm_delete<C: HttpClient>(&mut self, store: &FloorStore<C>) -> ClientResult<()> {
        if !self.confirming_delete {
            return Err(ClientError::invalid_state("Zone deletion was not requested"));
        }
        store.delete_zone(self.zone.id).await?;
        self.confirming_delete = false;
        Ok(())
    }
}

impl KeyedCard for ZoneCard {
    type Item = Zone;

    fn from_item(item: Zone) -> Self {
        Self::new(item)
    }

    fn key(&self) -> i64 {
        self.zone.id
    }

    fn item_key(item: &Zone) -> i64 {
        item.id
    }

    fn refresh(&mut self, item: Zone) {
        self.zone = item;
    }
}
