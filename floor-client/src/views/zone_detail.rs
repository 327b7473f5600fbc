//! Zone detail page: one zone, its tables (vacant first) and statistics

use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use shared::models::{DiningTable, Occupancy, Zone};

use super::{
    AddTableModal, EditTableModal, KeyedCard, TableCard, TableDetailModal, reconcile_cards,
};
use crate::{ClientError, ClientResult, Collection, FloorStore, HttpClient, LoadState, NetworkHttpClient};

/// Zone id from a route segment such as `/zones/{id}`
pub fn parse_zone_id(raw: &str) -> ClientResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ClientError::validation("Zone ID is missing"));
    }
    raw.parse()
        .map_err(|_| ClientError::validation(format!("Invalid zone ID: {raw}")))
}

/// Split the tables of one zone into (vacant, occupied), both in fetch order
pub fn partition_tables(
    tables: &[DiningTable],
    zone_id: i64,
) -> (Vec<DiningTable>, Vec<DiningTable>) {
    tables
        .iter()
        .filter(|t| t.zone_id() == Some(zone_id))
        .cloned()
        .partition(DiningTable::is_available)
}

/// Everything the loaded page renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneDetail {
    pub zone: Zone,
    pub available: Vec<DiningTable>,
    pub occupied: Vec<DiningTable>,
}

impl ZoneDetail {
    pub fn new(zone: Zone, tables: &[DiningTable]) -> Self {
        let (available, occupied) = partition_tables(tables, zone.id);
        Self {
            zone,
            available,
            occupied,
        }
    }

    /// Display order: vacant tables, then occupied ones
    pub fn ordered(&self) -> impl Iterator<Item = &DiningTable> {
        self.available.iter().chain(self.occupied.iter())
    }

    pub fn statistics(&self) -> Occupancy {
        Occupancy {
            total: self.available.len() + self.occupied.len(),
            occupied: self.occupied.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.occupied.is_empty()
    }
}

type ZoneSlot = watch::Sender<LoadState<Zone>>;

pub struct ZoneDetailPage<C = NetworkHttpClient> {
    store: FloorStore<C>,
    zone_id: i64,
    zone: Arc<ZoneSlot>,
    tables: watch::Receiver<Collection<DiningTable>>,
    cards: Vec<TableCard>,
    add_modal: Option<AddTableModal>,
    edit_modal: Option<EditTableModal>,
    detail_modal: Option<TableDetailModal>,
}

impl<C: HttpClient> ZoneDetailPage<C> {
    pub fn new(store: FloorStore<C>, zone_id: i64) -> Self {
        let tables = store.subscribe_tables();
        Self {
            store,
            zone_id,
            zone: Arc::new(watch::channel(LoadState::Idle).0),
            tables,
            cards: Vec::new(),
            add_modal: None,
            edit_modal: None,
            detail_modal: None,
        }
    }

    /// Page for a raw route segment; bad ids fail before any request
    pub fn from_route(store: FloorStore<C>, raw_id: &str) -> ClientResult<Self> {
        Ok(Self::new(store, parse_zone_id(raw_id)?))
    }

    pub fn zone_id(&self) -> i64 {
        self.zone_id
    }

    pub fn store(&self) -> &FloorStore<C> {
        &self.store
    }

    /// Fetch the zone and the table list; errors leave the page in `Failed`
    pub async fn load(&mut self) -> ClientResult<()> {
        let result = load_zone(&self.store, self.zone_id, &Arc::downgrade(&self.zone)).await;
        self.sync();
        result
    }

    /// Start loading in the background
    ///
    /// The task only holds a weak handle to the page state: if the page is
    /// dropped before the response arrives, the result is discarded.
    pub fn spawn_load(&self) -> JoinHandle<ClientResult<()>>
    where
        C: 'static,
    {
        let store = self.store.clone();
        let zone_id = self.zone_id;
        let slot = Arc::downgrade(&self.zone);
        tokio::spawn(async move { load_zone(&store, zone_id, &slot).await })
    }

    pub fn status(&self) -> LoadState<ZoneDetail> {
        let zone = self.zone.borrow();
        let tables = self.tables.borrow();
        match (&*zone, &*tables) {
            (LoadState::Failed(message), _) | (_, LoadState::Failed(message)) => {
                LoadState::Failed(message.clone())
            }
            (LoadState::Ready(zone), LoadState::Ready(tables)) => {
                LoadState::Ready(ZoneDetail::new(zone.clone(), tables))
            }
            (LoadState::Idle, _) => LoadState::Idle,
            _ => LoadState::Loading,
        }
    }

    /// Rebuild the table cards from the store, vacant tables first
    pub fn sync(&mut self) {
        if let LoadState::Ready(detail) = self.status() {
            reconcile_cards(&mut self.cards, detail.ordered().cloned());
        }
    }

    pub fn cards(&self) -> &[TableCard] {
        &self.cards
    }

    pub fn card_mut(&mut self, table_id: i64) -> Option<&mut TableCard> {
        self.cards.iter_mut().find(|c| c.key() == table_id)
    }

    fn card_for(cards: &mut [TableCard], table_id: i64) -> ClientResult<&mut TableCard> {
        cards
            .iter_mut()
            .find(|c| c.key() == table_id)
            .ok_or_else(|| ClientError::NotFound(format!("Table {table_id}")))
    }

    fn table(&self, table_id: i64) -> ClientResult<DiningTable> {
        self.cards
            .iter()
            .find(|c| c.key() == table_id)
            .map(|c| c.table().clone())
            .ok_or_else(|| ClientError::NotFound(format!("Table {table_id}")))
    }

    // ========== Card actions ==========

    pub async fn save_table(&mut self, table_id: i64) -> ClientResult<()> {
        let card = Self::card_for(&mut self.cards, table_id)?;
        let result = card.save(&self.store).await;
        self.sync();
        result
    }

    pub async fn confirm_delete_table(&mut self, table_id: i64) -> ClientResult<()> {
        let card = Self::card_for(&mut self.cards, table_id)?;
        let result = card.confirm_delete(&self.store).await;
        self.sync();
        result
    }

    pub async fn open_seat_form(&mut self, table_id: i64) -> ClientResult<()> {
        let card = Self::card_for(&mut self.cards, table_id)?;
        card.open_seat_form(&self.store).await
    }

    pub async fn submit_seat_form(&mut self, table_id: i64) -> ClientResult<()> {
        let card = Self::card_for(&mut self.cards, table_id)?;
        let result = card.submit_seat_form(&self.store).await;
        self.sync();
        result.map(|_| ())
    }

    pub async fn return_table(&mut self, table_id: i64) -> ClientResult<()> {
        let card = Self::card_for(&mut self.cards, table_id)?;
        let result = card.return_table(&self.store).await;
        self.sync();
        result
    }

    // ========== Add table ==========

    pub fn open_add_table(&mut self) {
        self.add_modal = Some(AddTableModal::new(self.zone_id));
    }

    pub fn add_modal_mut(&mut self) -> Option<&mut AddTableModal> {
        self.add_modal.as_mut()
    }

    pub fn close_add_table(&mut self) {
        self.add_modal = None;
    }

    pub async fn submit_add_table(&mut self) -> ClientResult<DiningTable> {
        let Some(modal) = self.add_modal.as_mut() else {
            return Err(ClientError::invalid_state("Add table dialog is not open"));
        };
        let result = modal.submit(&self.store).await;
        if !modal.is_open() {
            self.add_modal = None;
        }
        self.sync();
        result
    }

    // ========== Edit table (dialog) ==========

    pub fn open_edit_table(&mut self, table_id: i64) -> ClientResult<()> {
        let table = self.table(table_id)?;
        self.edit_modal = Some(EditTableModal::new(&table));
        Ok(())
    }

    pub fn edit_modal_mut(&mut self) -> Option<&mut EditTableModal> {
        self.edit_modal.as_mut()
    }

    pub fn close_edit_table(&mut self) {
        self.edit_modal = None;
    }

    pub async fn submit_edit_table(&mut self) -> ClientResult<DiningTable> {
        let Some(modal) = self.edit_modal.as_mut() else {
            return Err(ClientError::invalid_state("Edit table dialog is not open"));
        };
        let result = modal.submit(&self.store).await;
        if !modal.is_open() {
            self.edit_modal = None;
        }
        self.sync();
        result
    }

    // ========== Table details ==========

    pub fn view_table(&mut self, table_id: i64) -> ClientResult<&TableDetailModal> {
        let table = self.table(table_id)?;
        tracing::debug!(table_id, "Showing table details");
        Ok(self.detail_modal.insert(TableDetailModal::new(table)))
    }

    pub fn detail_modal(&self) -> Option<&TableDetailModal> {
        self.detail_modal.as_ref()
    }

    pub fn close_details(&mut self) {
        self.detail_modal = None;
    }
}

async fn load_zone<C: HttpClient>(
    store: &FloorStore<C>,
    zone_id: i64,
    slot: &Weak<ZoneSlot>,
) -> ClientResult<()> {
    match slot.upgrade() {
        Some(slot) => {
            slot.send_replace(LoadState::Loading);
        }
        None => return Ok(()),
    }

    let result: ClientResult<Zone> = async {
        let zone = store.fetch_zone(zone_id).await?;
        store.load_tables().await?;
        Ok(zone)
    }
    .await;

    let Some(slot) = slot.upgrade() else {
        tracing::trace!(zone_id, "Zone page dropped before load finished, discarding");
        return result.map(|_| ());
    };
    match result {
        Ok(zone) => {
            slot.send_replace(LoadState::Ready(zone));
            Ok(())
        }
        Err(e) => {
            slot.send_replace(LoadState::Failed(e.to_string()));
            Err(e)
        }
    }
}
