//! Weather snapshot cache

use std::sync::RwLock;
use super::models::WeatherSnapshot;

/// Most recent weather snapshot, shared between the refresher and the HTTP
/// handlers. Starts as the zero snapshot until the first successful fetch.
#[derive(Default)]
pub struct WeatherCache {
    snapshot: RwLock<WeatherSnapshot>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the current snapshot
    pub fn read(&self) -> WeatherSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Swap in a new snapshot (called from the refresher only)
    pub fn replace(&self, snapshot: WeatherSnapshot) {
        let mut current = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *current = snapshot;
    }
}
