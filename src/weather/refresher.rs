use async_trait::async_trait;
use std::sync::Arc;

use super::cache::WeatherCache;
use super::client::ForecastClient;
use super::errors::WeatherError;
use crate::utils::periodic::PeriodicTask;

/// What one refresh cycle did to the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    /// Forecast had no periods; the previous snapshot was kept
    NoPeriods,
}

/// Periodically replaces the weather cache with a fresh forecast
pub struct WeatherRefresher {
    client: ForecastClient,
    cache: Arc<WeatherCache>,
}

impl WeatherRefresher {
    pub fn new(client: ForecastClient, cache: Arc<WeatherCache>) -> Self {
        Self { client, cache }
    }

    /// Run one fetch cycle. The cache is only written on success; no lock is
    /// held while the upstream requests are in flight.
    pub async fn refresh(&self) -> Result<RefreshOutcome, WeatherError> {
        match self.client.fetch().await? {
            Some(snapshot) => {
                tracing::info!(
                    "Weather updated: {} {}",
                    snapshot.temperature,
                    snapshot.description
                );
                self.cache.replace(snapshot);
                Ok(RefreshOutcome::Updated)
            }
            None => Ok(RefreshOutcome::NoPeriods),
        }
    }
}

#[async_trait]
impl PeriodicTask for WeatherRefresher {
    fn name(&self) -> &'static str {
        "weather"
    }

    async fn tick(&self) {
        match self.refresh().await {
            Ok(RefreshOutcome::Updated) => {}
            Ok(RefreshOutcome::NoPeriods) => {
                tracing::warn!("NOAA forecast has no periods, keeping previous weather");
            }
            Err(e) => {
                tracing::error!("Weather fetch error: {}", e);
            }
        }
    }
}
