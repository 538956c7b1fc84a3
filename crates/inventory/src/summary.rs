use std::collections::HashSet;

use serde::Serialize;

use crate::record::{EnrichedRecord, StockStatus};

/// Headline figures for one refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InventorySummary {
    pub locations_monitored: usize,
    pub total_stock: f64,
    pub critical: usize,
    pub warning: usize,
    pub ok: usize,
}

impl InventorySummary {
    pub fn from_records(records: &[EnrichedRecord]) -> Self {
        let locations: HashSet<_> = records.iter().map(|r| r.location()).collect();
        let count = |status: StockStatus| records.iter().filter(|r| r.status == status).count();

        Self {
            locations_monitored: locations.len(),
            total_stock: records.iter().map(|r| r.record.current_stock).sum(),
            critical: count(StockStatus::Critical),
            warning: count(StockStatus::Warning),
            ok: count(StockStatus::Ok),
        }
    }
}
