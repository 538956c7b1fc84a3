use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use pharmaguard_core::{DomainError, DomainResult};
use pharmaguard_inventory::InventorySnapshot;

use super::InventorySource;

/// Reuses the last successful fetch while it is younger than `ttl`.
///
/// A zero TTL refetches every time. Failed fetches are not cached.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    cached: Mutex<Option<(Instant, InventorySnapshot)>>,
}

impl<S: InventorySource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }
}

impl<S: InventorySource> InventorySource for CachedSource<S> {
    fn fetch(&self) -> DomainResult<InventorySnapshot> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| DomainError::data_unavailable("inventory cache lock poisoned"))?;

        if let Some((fetched_at, snapshot)) = cached.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                debug!(as_of = %snapshot.as_of, "serving cached inventory snapshot");
                return Ok(snapshot.clone());
            }
        }

        let snapshot = self.inner.fetch()?;
        *cached = Some((Instant::now(), snapshot.clone()));
        Ok(snapshot)
    }
}
