//! Inventory data sources.
//!
//! The risk engine has no opinion on where rows come from; these adapters
//! fetch them and stamp the fetch time.

mod cache;
mod csv_file;
mod sample;

pub use cache::CachedSource;
pub use csv_file::{CsvInventorySource, read_rows};
pub use sample::SampleInventorySource;

use pharmaguard_core::DomainResult;
use pharmaguard_inventory::InventorySnapshot;

/// Something that can produce a fresh inventory snapshot.
///
/// Implementations fail with `DomainError::DataUnavailable` when the store
/// cannot be read or holds no rows.
pub trait InventorySource: Send + Sync {
    fn fetch(&self) -> DomainResult<InventorySnapshot>;
}

impl<S: InventorySource + ?Sized> InventorySource for Box<S> {
    fn fetch(&self) -> DomainResult<InventorySnapshot> {
        (**self).fetch()
    }
}

impl<S: InventorySource + ?Sized> InventorySource for std::sync::Arc<S> {
    fn fetch(&self) -> DomainResult<InventorySnapshot> {
        (**self).fetch()
    }
}
