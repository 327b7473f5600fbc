//! Plain-text rendering of the view-models

use floor_client::models::{Customer, DiningTable, ZoneStatistics};
use floor_client::views::{TableCard, TableDetailModal, ZoneCard, ZoneDetail};
use floor_client::{Notification, NotificationLevel};

const BAR_WIDTH: usize = 20;

/// `[#####---------------]  25%`
pub fn usage_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

pub fn zone_cards(cards: &[ZoneCard]) -> String {
    if cards.is_empty() {
        return "No zones yet.\n".to_string();
    }
    let mut out = String::new();
    for card in cards {
        let stats = card.stats();
        out.push_str(&format!(
            "{:>4}  {:<20} {} {}/{} occupied{}\n",
            card.zone().id,
            card.zone().name,
            usage_bar(card.usage_percent()),
            stats.occupied,
            stats.total,
            if stats.is_mostly_occupied() { "  busy" } else { "" },
        ));
    }
    out
}

pub fn zone_detail(detail: &ZoneDetail) -> String {
    let stats = detail.statistics();
    let mut out = format!(
        "{} (#{})\n{} total, {} available, {} occupied\n",
        detail.zone.name,
        detail.zone.id,
        stats.total,
        stats.available(),
        stats.occupied,
    );
    if detail.is_empty() {
        out.push_str("No tables in this zone.\n");
        return out;
    }
    for table in detail.ordered() {
        out.push_str(&table_line(table));
    }
    out
}

pub fn table_line(table: &DiningTable) -> String {
    let mut line = format!(
        "{:>4}  {:<12} {:>2} seats  {:<8}",
        table.id,
        table.name,
        table.capacity,
        table.status_label(),
    );
    if let Some(zone) = &table.zone {
        line.push_str(&format!("  {}", zone.name));
    }
    if let Some(customer) = table.customer() {
        line.push_str(&format!("  {} ({})", customer.name, customer.phone));
    }
    line.push('\n');
    line
}

pub fn table_cards(cards: &[TableCard]) -> String {
    if cards.is_empty() {
        return "No tables.\n".to_string();
    }
    cards.iter().map(|c| table_line(c.table())).collect()
}

pub fn tables(tables: &[DiningTable]) -> String {
    if tables.is_empty() {
        return "No tables.\n".to_string();
    }
    tables.iter().map(table_line).collect()
}

pub fn table_details(modal: &TableDetailModal) -> String {
    let mut out = String::new();
    for (label, value) in modal.fields() {
        out.push_str(&format!("{label:<10} {value}\n"));
    }
    if let Some(customer) = modal.customer() {
        out.push_str(&format!(
            "{:<10} {} ({})\n",
            "Customer", customer.name, customer.phone
        ));
    }
    out
}

pub fn customers(customers: &[&Customer]) -> String {
    if customers.is_empty() {
        return "No customers.\n".to_string();
    }
    let mut out = String::new();
    for customer in customers {
        let seat = customer
            .table
            .as_ref()
            .map_or_else(|| "-".to_string(), |t| t.name.clone());
        out.push_str(&format!(
            "{:>4}  {:<20} {:<14} {}\n",
            customer.id, customer.name, customer.phone, seat
        ));
    }
    out
}

pub fn statistics(stats: &[ZoneStatistics]) -> String {
    stats
        .iter()
        .map(|s| format!("{:<20} {} available\n", s.zone, s.available_tables))
        .collect()
}

pub fn notification(n: &Notification) -> String {
    let tag = match n.level {
        NotificationLevel::Info => "info",
        NotificationLevel::Warning => "warn",
        NotificationLevel::Error => "error",
    };
    format!("[{tag}] {}: {}", n.title, n.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floor_client::models::{CustomerRef, TableState, Zone};

    fn table(id: i64, available: bool) -> DiningTable {
        DiningTable {
            id,
            name: format!("T{id}"),
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
    fn test_usage_bar() {
        assert_eq!(usage_bar(0), format!("[{}]   0%", "-".repeat(20)));
        assert_eq!(usage_bar(100), format!("[{}] 100%", "#".repeat(20)));
        assert!(usage_bar(50).starts_with("[##########----------]"));
    }

    #[test]
    fn test_zone_detail_lists_vacant_first() {
        let zone = Zone {
            id: 1,
            name: "Hall".into(),
            tables: None,
        };
        let detail = ZoneDetail::new(zone, &[]);
        assert!(zone_detail(&detail).contains("No tables in this zone."));

        let detail = ZoneDetail {
            zone: detail.zone,
            available: vec![table(2, true)],
            occupied: vec![table(1, false)],
        };
        let text = zone_detail(&detail);
        let vacant = text.find("T2").unwrap();
        let occupied = text.find("T1").unwrap();
        assert!(vacant < occupied);
        assert!(text.contains("2 total, 1 available, 1 occupied"));
        assert!(text.contains("An (0901)"));
    }

    #[test]
    fn test_zone_cards_mark_busy_zones() {
        let busy = ZoneCard::new(Zone {
            id: 1,
            name: "Hall".into(),
            tables: Some(vec![table(1, false), table(2, false), table(3, true)]),
        });
        let quiet = ZoneCard::new(Zone {
            id: 2,
            name: "Patio".into(),
            tables: Some(vec![table(4, false), table(5, true)]),
        });
        let text = zone_cards(&[busy, quiet]);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("2/3 occupied  busy"));
        assert!(lines[1].ends_with("1/2 occupied"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(zone_cards(&[]), "No zones yet.\n");
        assert_eq!(customers(&[]), "No customers.\n");
    }
}
