use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pharmaguard_core::{DomainError, DomainResult, ItemName, Location, StockKey};

/// Raw row as delivered by the data store.
///
/// Column names follow the store contract (`LOCATION`, `ITEM_NAME`, ...).
/// `daily_usage_avg` is optional: most stores do not carry it, in which case a
/// [`UsageStrategy`](crate::usage::UsageStrategy) supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    #[serde(rename = "LOCATION")]
    pub location: String,
    #[serde(rename = "ITEM_NAME")]
    pub item: String,
    #[serde(rename = "CURRENT_STOCK")]
    pub current_stock: f64,
    #[serde(rename = "LEAD_TIME_DAYS")]
    pub lead_time_days: f64,
    #[serde(rename = "DAILY_USAGE_AVG", default)]
    pub daily_usage_avg: Option<f64>,
}

impl StockRow {
    pub fn new(
        location: impl Into<String>,
        item: impl Into<String>,
        current_stock: f64,
        lead_time_days: f64,
    ) -> Self {
        Self {
            location: location.into(),
            item: item.into(),
            current_stock,
            lead_time_days,
            daily_usage_avg: None,
        }
    }

    pub fn with_usage(mut self, daily_usage_avg: f64) -> Self {
        self.daily_usage_avg = Some(daily_usage_avg);
        self
    }

    /// Attach a resolved usage figure, producing an engine input record.
    pub fn into_record(self, daily_usage_avg: f64) -> DomainResult<InventoryRecord> {
        let key = StockKey::parse(&self.location, &self.item).map_err(|e| {
            DomainError::malformed(&self.location, &self.item, e.to_string())
        })?;
        Ok(InventoryRecord {
            key,
            current_stock: self.current_stock,
            lead_time_days: self.lead_time_days,
            daily_usage_avg,
        })
    }
}

/// One fetch of the data store, stamped with when it was taken.
///
/// Each dashboard refresh is computed from exactly one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub as_of: DateTime<Utc>,
    pub rows: Vec<StockRow>,
}

impl InventorySnapshot {
    pub fn new(as_of: DateTime<Utc>, rows: Vec<StockRow>) -> Self {
        Self { as_of, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Engine input: one `(location, item)` with usage resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub key: StockKey,
    pub current_stock: f64,
    pub lead_time_days: f64,
    pub daily_usage_avg: f64,
}

impl InventoryRecord {
    pub fn new(
        location: &str,
        item: &str,
        current_stock: f64,
        lead_time_days: f64,
        daily_usage_avg: f64,
    ) -> DomainResult<Self> {
        StockRow::new(location, item, current_stock, lead_time_days).into_record(daily_usage_avg)
    }

    pub fn location(&self) -> &Location {
        &self.key.location
    }

    pub fn item(&self) -> &ItemName {
        &self.key.item
    }
}

/// Risk tier of a record. Ordered from least to most severe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Ok,
    Warning,
    Critical,
}

impl StockStatus {
    /// Classify a runway against a lead time. First match wins:
    /// - `Critical` if stock runs out before a reorder placed today could land
    /// - `Warning` if less than one further lead time of buffer remains
    /// - `Ok` otherwise
    pub fn classify(days_runway: f64, lead_time_days: f64) -> Self {
        if days_runway < lead_time_days {
            StockStatus::Critical
        } else if days_runway < lead_time_days * 2.0 {
            StockStatus::Warning
        } else {
            StockStatus::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Ok => "OK",
            StockStatus::Warning => "WARNING",
            StockStatus::Critical => "CRITICAL",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Engine output. Derived on every refresh and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: InventoryRecord,
    pub days_runway: f64,
    pub suggested_reorder: u64,
    pub status: StockStatus,
}

impl EnrichedRecord {
    pub fn location(&self) -> &Location {
        self.record.location()
    }

    pub fn item(&self) -> &ItemName {
        self.record.item()
    }

    pub fn is_critical(&self) -> bool {
        self.status == StockStatus::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runway_equal_to_lead_time_is_warning() {
        assert_eq!(StockStatus::classify(7.0, 7.0), StockStatus::Warning);
    }

    #[test]
    fn runway_equal_to_twice_lead_time_is_ok() {
        assert_eq!(StockStatus::classify(14.0, 7.0), StockStatus::Ok);
    }

    #[test]
    fn runway_below_lead_time_is_critical() {
        assert_eq!(StockStatus::classify(6.99, 7.0), StockStatus::Critical);
    }

    #[test]
    fn status_serializes_in_upper_case() {
        let json = serde_json::to_string(&StockStatus::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }

    #[test]
    fn blank_location_is_a_malformed_record() {
        let err = InventoryRecord::new(" ", "Insulin Vials", 2.0, 7.0, 1.0).unwrap_err();
        assert!(matches!(err, DomainError::MalformedRecord { .. }));
    }
}
