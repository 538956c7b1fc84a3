use tracing::debug;

use pharmaguard_core::{DomainError, DomainResult};

use crate::record::{EnrichedRecord, InventoryRecord, StockRow, StockStatus};
use crate::usage::UsageStrategy;

/// Reorder quantity covers lead-time demand plus 50%.
pub const REORDER_SAFETY_FACTOR: f64 = 1.5;

/// Deterministic runway / reorder / status computation.
///
/// Stateless: every call starts again from raw records.
#[derive(Debug, Default, Copy, Clone)]
pub struct RiskEngine;

impl RiskEngine {
    pub fn new() -> Self {
        Self
    }

    /// Enrich records, preserving input order.
    ///
    /// Fails on the first record that would yield an undefined or negative
    /// runway; nothing is skipped silently.
    pub fn enrich(&self, records: &[InventoryRecord]) -> DomainResult<Vec<EnrichedRecord>> {
        let enriched = records
            .iter()
            .map(enrich_one)
            .collect::<DomainResult<Vec<_>>>()?;

        debug!(
            records = enriched.len(),
            critical = enriched.iter().filter(|r| r.is_critical()).count(),
            "inventory enriched"
        );
        Ok(enriched)
    }

    /// Resolve usage for raw rows through `strategy`, then enrich.
    pub fn enrich_rows(
        &self,
        rows: &[StockRow],
        strategy: &dyn UsageStrategy,
    ) -> DomainResult<Vec<EnrichedRecord>> {
        let usage = strategy.daily_usage(rows)?;
        if usage.len() != rows.len() {
            return Err(DomainError::validation(format!(
                "usage strategy '{}' returned {} figures for {} rows",
                strategy.name(),
                usage.len(),
                rows.len()
            )));
        }

        let records = rows
            .iter()
            .cloned()
            .zip(usage)
            .map(|(row, usage)| row.into_record(usage))
            .collect::<DomainResult<Vec<_>>>()?;

        debug!(strategy = strategy.name(), rows = records.len(), "usage resolved");
        self.enrich(&records)
    }
}

fn enrich_one(record: &InventoryRecord) -> DomainResult<EnrichedRecord> {
    validate(record)?;

    // -0.0 passes `>= 0.0`; fold it to +0.0 so runways order and print as zero.
    let mut record = record.clone();
    record.current_stock += 0.0;

    let days_runway = record.current_stock / record.daily_usage_avg;
    let suggested_reorder =
        (record.lead_time_days * record.daily_usage_avg * REORDER_SAFETY_FACTOR).floor() as u64;
    let status = StockStatus::classify(days_runway, record.lead_time_days);

    Ok(EnrichedRecord {
        record,
        days_runway,
        suggested_reorder,
        status,
    })
}

fn validate(record: &InventoryRecord) -> DomainResult<()> {
    let location = record.location().as_str();
    let item = record.item().as_str();

    if !(record.daily_usage_avg.is_finite() && record.daily_usage_avg > 0.0) {
        return Err(DomainError::invalid_usage(location, item));
    }
    if !(record.current_stock.is_finite() && record.current_stock >= 0.0) {
        return Err(DomainError::malformed(
            location,
            item,
            "current stock must be a finite non-negative number",
        ));
    }
    if !(record.lead_time_days.is_finite() && record.lead_time_days > 0.0) {
        return Err(DomainError::malformed(
            location,
            item,
            "lead time must be a finite positive number of days",
        ));
    }
    Ok(())
}

/// CRITICAL records in input order.
pub fn critical_subset(records: &[EnrichedRecord]) -> Vec<EnrichedRecord> {
    records.iter().filter(|r| r.is_critical()).cloned().collect()
}

/// CRITICAL records, shortest runway first. Ties keep input order.
pub fn reorder_list(records: &[EnrichedRecord]) -> Vec<EnrichedRecord> {
    let mut critical = critical_subset(records);
    critical.sort_by(|a, b| a.days_runway.total_cmp(&b.days_runway));
    critical
}
