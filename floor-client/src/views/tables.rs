//! Tables page: every table across all zones

use tokio::sync::watch;

use shared::models::DiningTable;

use super::{KeyedCard, TableCard, reconcile_cards};
use crate::{ClientError, ClientResult, Collection, FloorStore, HttpClient, LoadState, NetworkHttpClient};

pub struct TablesPage<C = NetworkHttpClient> {
    store: FloorStore<C>,
    tables: watch::Receiver<Collection<DiningTable>>,
    cards: Vec<TableCard>,
}

impl<C: HttpClient> TablesPage<C> {
    pub fn new(store: FloorStore<C>) -> Self {
        let tables = store.subscribe_tables();
        let mut page = Self {
            store,
            tables,
            cards: Vec::new(),
        };
        page.sync();
        page
    }

    pub fn store(&self) -> &FloorStore<C> {
        &self.store
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        let result = self.store.load_tables().await;
        self.sync();
        result
    }

    pub fn sync(&mut self) {
        let tables = self.tables.borrow_and_update();
        if let LoadState::Ready(tables) = &*tables {
            reconcile_cards(&mut self.cards, tables.iter().cloned());
        }
    }

    pub fn state(&self) -> LoadState<&[TableCard]> {
        self.tables.borrow().status().map(|()| self.cards.as_slice())
    }

    pub fn cards(&self) -> &[TableCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
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
}
