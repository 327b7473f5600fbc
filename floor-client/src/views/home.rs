//! Home page: all zones as cards, plus the create-zone form

use tokio::sync::watch;

use shared::models::Zone;

use super::{KeyedCard, ZoneCard, reconcile_cards, reject, required};
use crate::{ClientError, ClientResult, Collection, FloorStore, HttpClient, LoadState, NetworkHttpClient};

/// Create-zone dialog state
#[derive(Debug, Clone, Default)]
pub struct CreateZoneForm {
    pub name: String,
}

pub struct HomePage<C = NetworkHttpClient> {
    store: FloorStore<C>,
    zones: watch::Receiver<Collection<Zone>>,
    cards: Vec<ZoneCard>,
    create_form: Option<CreateZoneForm>,
}

impl<C: HttpClient> HomePage<C> {
    pub fn new(store: FloorStore<C>) -> Self {
        let zones = store.subscribe_zones();
        let mut page = Self {
            store,
            zones,
            cards: Vec::new(),
            create_form: None,
        };
        page.sync();
        page
    }

    pub fn store(&self) -> &FloorStore<C> {
        &self.store
    }

    /// Fetch all zones; on failure the page shows a retryable error
    pub async fn load(&mut self) -> ClientResult<()> {
        let result = self.store.load_zones().await;
        self.sync();
        result
    }

    /// Pick up whatever the store holds now
    pub fn sync(&mut self) {
        let zones = self.zones.borrow_and_update();
        if let LoadState::Ready(zones) = &*zones {
            reconcile_cards(&mut self.cards, zones.iter().cloned());
        }
    }

    pub fn state(&self) -> LoadState<&[ZoneCard]> {
        self.zones.borrow().status().map(|()| self.cards.as_slice())
    }

    pub fn cards(&self) -> &[ZoneCard] {
        &self.cards
    }

    pub fn card_mut(&mut self, zone_id: i64) -> Option<&mut ZoneCard> {
        self.cards.iter_mut().find(|c| c.key() == zone_id)
    }

    fn card_for(cards: &mut [ZoneCard], zone_id: i64) -> ClientResult<&mut ZoneCard> {
        cards
            .iter_mut()
            .find(|c| c.key() == zone_id)
            .ok_or_else(|| ClientError::NotFound(format!("Zone {zone_id}")))
    }

    // ========== Card actions ==========

    pub async fn save_zone(&mut self, zone_id: i64) -> ClientResult<()> {
        let card = Self::card_for(&mut self.cards, zone_id)?;
        let result = card.save(&self.store).await;
        self.sync();
        result
    }

    pub async fn confirm_delete_zone(&mut self, zone_id: i64) -> ClientResult<()> {
        let card = Self::card_for(&mut self.cards, zone_id)?;
        let result = card.confirm_delete(&self.store).await;
        self.sync();
        result
    }

    // ========== Create zone ==========

    pub fn open_create(&mut self) {
        self.create_form = Some(CreateZoneForm::default());
    }

    pub fn close_create(&mut self) {
        self.create_form = None;
    }

    pub fn create_form(&self) -> Option<&CreateZoneForm> {
        self.create_form.as_ref()
    }

    pub fn set_new_zone_name(&mut self, name: impl Into<String>) {
        if let Some(form) = self.create_form.as_mut() {
            form.name = name.into();
        }
    }

    /// Create the zone; the form closes only once the backend accepted it
    pub async fn submit_create(&mut self) -> ClientResult<Zone> {
        let Some(form) = self.create_form.as_ref() else {
            return Err(ClientError::invalid_state("Create zone form is not open"));
        };
        let Some(name) = required(&form.name) else {
            return Err(reject(&self.store, "Create zone", "Zone name is required"));
        };

        let zone = self.store.create_zone(name).await?;
        self.create_form = None;
        self.sync();
        Ok(zone)
    }
}
