//! Inventory risk scoring.
//!
//! This crate turns stock / lead-time / usage figures into runway, reorder
//! and status, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod heatmap;
pub mod record;
pub mod risk;
pub mod summary;
pub mod usage;

pub use heatmap::Heatmap;
pub use record::{EnrichedRecord, InventoryRecord, InventorySnapshot, StockRow, StockStatus};
pub use risk::{REORDER_SAFETY_FACTOR, RiskEngine, critical_subset, reorder_list};
pub use summary::InventorySummary;
pub use usage::{DirectUsage, LookupUsage, StockMagnitudeUsage, UsageBucket, UsageStrategy};
