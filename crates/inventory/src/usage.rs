//! Pluggable sources of `daily_usage_avg`.
//!
//! The data store rarely carries consumption figures, so the engine asks a
//! [`UsageStrategy`] for them. Strategies never paper over missing data: a row
//! they cannot serve is an error, not a zero.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pharmaguard_core::{DomainError, DomainResult};

use crate::record::StockRow;

/// Supplies one usage figure per row, in row order.
pub trait UsageStrategy: Send + Sync {
    /// Short identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    fn daily_usage(&self, rows: &[StockRow]) -> DomainResult<Vec<f64>>;
}

/// Usage is already on the row.
#[derive(Debug, Default, Copy, Clone)]
pub struct DirectUsage;

impl UsageStrategy for DirectUsage {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn daily_usage(&self, rows: &[StockRow]) -> DomainResult<Vec<f64>> {
        rows.iter()
            .map(|row| {
                row.daily_usage_avg
                    .ok_or_else(|| DomainError::missing_usage(&row.location, &row.item))
            })
            .collect()
    }
}

/// Fixed item → usage table with a fallback for unknown items.
#[derive(Debug, Clone)]
pub struct LookupUsage {
    table: HashMap<String, f64>,
    default_usage: f64,
}

impl LookupUsage {
    pub fn new(default_usage: f64) -> Self {
        Self {
            table: HashMap::new(),
            default_usage,
        }
    }

    pub fn with_item(mut self, item: impl Into<String>, usage: f64) -> Self {
        self.table.insert(item.into(), usage);
        self
    }

    /// Table for the formulary tracked by the demo dataset.
    pub fn formulary(default_usage: f64) -> Self {
        Self::new(default_usage)
            .with_item("Paracetamol (500mg)", 50.0)
            .with_item("Insulin Vials", 3.0)
            .with_item("Amoxicillin", 10.0)
    }
}

impl UsageStrategy for LookupUsage {
    fn name(&self) -> &'static str {
        "lookup"
    }

    fn daily_usage(&self, rows: &[StockRow]) -> DomainResult<Vec<f64>> {
        Ok(rows
            .iter()
            .map(|row| {
                self.table
                    .get(row.item.trim())
                    .copied()
                    .unwrap_or(self.default_usage)
            })
            .collect())
    }
}

/// Stock below `below_stock` draws usage uniformly from `min..=max`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UsageBucket {
    pub below_stock: f64,
    pub min_usage: u32,
    pub max_usage: u32,
}

/// Usage drawn from a range chosen by stock magnitude.
///
/// The generator is re-seeded from `seed` on every call, so the same rows in
/// the same order always get the same usage.
#[derive(Debug, Clone)]
pub struct StockMagnitudeUsage {
    seed: u64,
    buckets: Vec<UsageBucket>,
}

impl StockMagnitudeUsage {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            buckets: vec![
                UsageBucket {
                    below_stock: 100.0,
                    min_usage: 1,
                    max_usage: 5,
                },
                UsageBucket {
                    below_stock: 1_000.0,
                    min_usage: 5,
                    max_usage: 20,
                },
                UsageBucket {
                    below_stock: f64::INFINITY,
                    min_usage: 20,
                    max_usage: 100,
                },
            ],
        }
    }

    /// Replace the bucket table. Buckets must be sorted by `below_stock`,
    /// end with an unbounded bucket, and have `1 <= min <= max`.
    pub fn with_buckets(mut self, buckets: Vec<UsageBucket>) -> DomainResult<Self> {
        match buckets.last() {
            Some(last) if last.below_stock == f64::INFINITY => {}
            _ => {
                return Err(DomainError::validation(
                    "last usage bucket must be unbounded",
                ));
            }
        }
        if buckets.windows(2).any(|w| w[0].below_stock >= w[1].below_stock) {
            return Err(DomainError::validation(
                "usage buckets must be sorted by stock bound",
            ));
        }
        if buckets.iter().any(|b| b.min_usage == 0 || b.min_usage > b.max_usage) {
            return Err(DomainError::validation(
                "usage bucket ranges must satisfy 1 <= min <= max",
            ));
        }
        self.buckets = buckets;
        Ok(self)
    }

    fn bucket_for(&self, stock: f64) -> &UsageBucket {
        self.buckets
            .iter()
            .find(|b| stock < b.below_stock)
            .unwrap_or_else(|| &self.buckets[self.buckets.len() - 1])
    }
}

impl UsageStrategy for StockMagnitudeUsage {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn daily_usage(&self, rows: &[StockRow]) -> DomainResult<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok(rows
            .iter()
            .map(|row| {
                let bucket = self.bucket_for(row.current_stock);
                f64::from(rng.random_range(bucket.min_usage..=bucket.max_usage))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<StockRow> {
        vec![
            StockRow::new("Central Store", "Paracetamol (500mg)", 5000.0, 2.0),
            StockRow::new("Rural Clinic A", "Insulin Vials", 2.0, 7.0),
            StockRow::new("Emergency Ward", "Amoxicillin", 150.0, 2.0),
            StockRow::new("Emergency Ward", "Gauze", 40.0, 3.0),
        ]
    }

    #[test]
    fn direct_usage_reads_the_row() {
        let rows = vec![StockRow::new("A", "B", 10.0, 1.0).with_usage(2.5)];
        assert_eq!(DirectUsage.daily_usage(&rows).unwrap(), vec![2.5]);
    }

    #[test]
    fn direct_usage_refuses_rows_without_usage() {
        let err = DirectUsage.daily_usage(&rows()).unwrap_err();
        assert_eq!(
            err,
            DomainError::missing_usage("Central Store", "Paracetamol (500mg)")
        );
    }

    #[test]
    fn lookup_falls_back_to_default_for_unknown_items() {
        let usage = LookupUsage::formulary(4.0).daily_usage(&rows()).unwrap();
        assert_eq!(usage, vec![50.0, 3.0, 10.0, 4.0]);
    }

    #[test]
    fn heuristic_is_reproducible_for_a_seed() {
        let strategy = StockMagnitudeUsage::new(42);
        let first = strategy.daily_usage(&rows()).unwrap();
        let second = strategy.daily_usage(&rows()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn heuristic_draws_from_the_stock_bucket() {
        let usage = StockMagnitudeUsage::new(7).daily_usage(&rows()).unwrap();
        assert!((20.0..=100.0).contains(&usage[0]));
        assert!((1.0..=5.0).contains(&usage[1]));
        assert!((5.0..=20.0).contains(&usage[2]));
        assert!((1.0..=5.0).contains(&usage[3]));
    }

    #[test]
    fn heuristic_rejects_bounded_last_bucket() {
        let err = StockMagnitudeUsage::new(1)
            .with_buckets(vec![UsageBucket {
                below_stock: 10.0,
                min_usage: 1,
                max_usage: 2,
            }])
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn heuristic_rejects_zero_usage_range() {
        let err = StockMagnitudeUsage::new(1)
            .with_buckets(vec![UsageBucket {
                below_stock: f64::INFINITY,
                min_usage: 0,
                max_usage: 2,
            }])
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
