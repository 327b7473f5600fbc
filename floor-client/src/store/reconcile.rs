//! Local patching of fetched collections after a successful mutation

use shared::models::{Customer, DiningTable, Zone};

/// Entity with a backend-assigned id
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Zone {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for DiningTable {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Customer {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Replace the entry with the same id in place, or append
pub fn upsert<T: Keyed>(items: &mut Vec<T>, item: T) {
    match items.iter().position(|i| i.key() == item.key()) {
        Some(idx) => items[idx] = item,
        None => items.push(item),
    }
}

/// Returns whether anything was removed
pub fn remove<T: Keyed>(items: &mut Vec<T>, id: i64) -> bool {
    let before = items.len();
    items.retain(|i| i.key() != id);
    items.len() != before
}

/// Put `table` into the embedded table list of the zone it belongs to and
/// drop it from any other zone. Zones without an embedded list are skipped.
pub fn place_table(zones: &mut [Zone], table: &DiningTable) {
    let owner = table.zone_id();
    for zone in zones.iter_mut() {
        let Some(tables) = zone.tables.as_mut() else {
            continue;
        };
        let belongs = owner == Some(zone.id);
        match (tables.iter().position(|t| t.id == table.id), belongs) {
            (Some(idx), true) => tables[idx] = table.clone(),
            (Some(idx), false) => {
                tables.remove(idx);
            }
            (None, true) => tables.push(table.clone()),
            (None, false) => {}
        }
    }
}

pub fn remove_table_from_zones(zones: &mut [Zone], table_id: i64) {
    for tables in zones.iter_mut().filter_map(|z| z.tables.as_mut()) {
        tables.retain(|t| t.id != table_id);
    }
}

/// Keep the zone name embedded in tables in step with a rename
pub fn rename_zone_refs(tables: &mut [DiningTable], zone_id: i64, name: &str) {
    for zone in tables.iter_mut().filter_map(|t| t.zone.as_mut()) {
        if zone.id == zone_id {
            zone.name = name.to_string();
        }
    }
}
