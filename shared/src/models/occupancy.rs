//! Occupancy figures for a set of tables

use super::DiningTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub total: usize,
    pub occupied: usize,
}

impl Occupancy {
    pub fn of(tables: &[DiningTable]) -> Self {
        Self {
            total: tables.len(),
            occupied: tables.iter().filter(|t| !t.is_available()).count(),
        }
    }

    pub fn available(&self) -> usize {
        self.total.saturating_sub(self.occupied)
    }

    /// Width of the usage bar, in whole percent within `0..=100`
    pub fn usage_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.occupied as f64 / self.total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// More than half the tables are occupied
    pub fn is_mostly_occupied(&self) -> bool {
        self.occupied * 2 > self.total
    }
}
