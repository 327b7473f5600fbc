//! Headless view-models
//!
//! Each page, card and form owns its local UI state (drafts, edit mode,
//! confirmation flags, modal visibility) and exposes one method per user
//! action. Data always comes from the [`FloorStore`]; a view never keeps
//! its own copy of server state beyond the card it is rendering.

mod customer_form;
mod home;
mod modals;
mod table_card;
mod tables;
mod zone_card;
mod zone_detail;

pub use customer_form::{AddCustomerForm, CustomerFormMode, filter_customers, unseated};
pub use home::{CreateZoneForm, HomePage};
pub use modals::{AddTableModal, EditTableModal, TableDetailModal};
pub use table_card::{TableCard, TableDraft};
pub use tables::TablesPage;
pub use zone_card::ZoneCard;
pub use zone_detail::{ZoneDetail, ZoneDetailPage, parse_zone_id, partition_tables};

use std::collections::HashMap;

use crate::{ClientError, FloorStore, HttpClient};

/// Default seat count of a new table
pub const DEFAULT_CAPACITY: u32 = 4;

/// A card keyed by entity id, kept across refreshes
trait KeyedCard {
    type Item;

    fn from_item(item: Self::Item) -> Self;
    fn key(&self) -> i64;
    fn item_key(item: &Self::Item) -> i64;
    /// New server copy for an existing card; local UI state is kept
    fn refresh(&mut self, item: Self::Item);
}

/// Rebuild `cards` in the order of `items`, reusing cards whose id survived
fn reconcile_cards<K: KeyedCard>(cards: &mut Vec<K>, items: impl IntoIterator<Item = K::Item>) {
    let mut previous: HashMap<i64, K> = cards.drain(..).map(|c| (c.key(), c)).collect();
    cards.extend(items.into_iter().map(|item| {
        match previous.remove(&K::item_key(&item)) {
            Some(mut card) => {
                card.refresh(item);
                card
            }
            None => K::from_item(item),
        }
    }));
}

/// Report a form that failed client-side checks
fn reject<C: HttpClient>(store: &FloorStore<C>, action: &str, message: &str) -> ClientError {
    let err = ClientError::validation(message);
    tracing::debug!(action, %message, "Form rejected");
    store.notifications().from_error(action, &err);
    err
}

fn required(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Capacity typed into a form: a whole number of seats, at least one
fn parse_capacity(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|c| *c >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("6"), Some(6));
        assert_eq!(parse_capacity(" 2 "), Some(2));
        assert_eq!(parse_capacity("0"), None);
        assert_eq!(parse_capacity("-1"), None);
        assert_eq!(parse_capacity("four"), None);
        assert_eq!(parse_capacity(""), None);
    }

    #[test]
    fn test_required() {
        assert_eq!(required("  Patio "), Some("Patio"));
        assert_eq!(required("   "), None);
    }

    struct Card {
        id: i64,
        label: String,
        touched: bool,
    }

    impl KeyedCard for Card {
        type Item = (i64, String);

        fn from_item(item: Self::Item) -> Self {
            Self {
                id: item.0,
                label: item.1,
                touched: false,
            }
        }

        fn key(&self) -> i64 {
            self.id
        }

        fn item_key(item: &Self::Item) -> i64 {
            item.0
        }

        fn refresh(&mut self, item: Self::Item) {
            self.label = item.1;
        }
    }

    #[test]
    fn test_reconcile_keeps_local_state_by_id() {
        let mut cards = vec![
            Card::from_item((1, "a".into())),
            Card::from_item((2, "b".into())),
        ];
        cards[1].touched = true;

        reconcile_cards(
            &mut cards,
            vec![(2, "b2".into()), (3, "c".into())],
        );

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, 2);
        assert!(cards[0].touched);
        assert_eq!(cards[0].label, "b2");
        assert_eq!(cards[1].id, 3);
        assert!(!cards[1].touched);
    }
}
