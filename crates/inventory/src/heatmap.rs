use std::collections::HashMap;

use pharmaguard_core::{ItemName, Location, StockKey};

use crate::record::EnrichedRecord;

/// Location × item grid of `days_runway`.
///
/// Rows and columns appear in first-seen order. Duplicate keys keep the
/// smallest runway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heatmap {
    locations: Vec<Location>,
    items: Vec<ItemName>,
    cells: HashMap<StockKey, f64>,
}

impl Heatmap {
    pub fn from_records(records: &[EnrichedRecord]) -> Self {
        let mut map = Self::default();
        for r in records {
            if !map.locations.contains(r.location()) {
                map.locations.push(r.location().clone());
            }
            if !map.items.contains(r.item()) {
                map.items.push(r.item().clone());
            }
            map.cells
                .entry(r.record.key.clone())
                .and_modify(|runway| *runway = runway.min(r.days_runway))
                .or_insert(r.days_runway);
        }
        map
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn items(&self) -> &[ItemName] {
        &self.items
    }

    pub fn cell(&self, location: &Location, item: &ItemName) -> Option<f64> {
        self.cells
            .get(&StockKey::new(location.clone(), item.clone()))
            .copied()
    }

    /// One row per location, one column per item; `None` where the pair is
    /// not stocked.
    pub fn rows(&self) -> Vec<(&Location, Vec<Option<f64>>)> {
        self.locations
            .iter()
            .map(|loc| {
                let row = self.items.iter().map(|item| self.cell(loc, item)).collect();
                (loc, row)
            })
            .collect()
    }
}
