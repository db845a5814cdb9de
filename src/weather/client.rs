//! Two-step NOAA forecast client
//!
//! NOAA does not take coordinates on the forecast endpoint directly: the
//! `/points/{lat},{lon}` document names the forecast URL for that grid point,
//! which is then fetched for the actual periods.

use std::time::Duration;

use serde::de::DeserializeOwned;
use time::OffsetDateTime;

use super::errors::{Stage, WeatherError};
use super::models::{ForecastResponse, PointsResponse, WeatherSnapshot};

pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

/// Build the points URL for a coordinate, e.g.
/// `https://api.weather.gov/points/47.4502,-122.8276`
pub fn points_url(base_url: &str, latitude: f64, longitude: f64) -> String {
    format!(
        "{}/points/{:.4},{:.4}",
        base_url.trim_end_matches('/'),
        latitude,
        longitude
    )
}

#[derive(Clone)]
pub struct ForecastClient {
    agent: ureq::Agent,
    points_url: String,
}

impl ForecastClient {
    pub fn new(points_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build();
        Self {
            agent,
            points_url: points_url.into(),
        }
    }

    pub fn points_url(&self) -> &str {
        &self.points_url
    }

    /// Fetch the current forecast.
    ///
    /// Returns `Ok(None)` when the forecast document has no periods.
    pub async fn fetch(&self) -> Result<Option<WeatherSnapshot>, WeatherError> {
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.fetch_blocking())
            .await
            .map_err(|e| WeatherError::Worker(e.into()))?
    }

    fn fetch_blocking(&self) -> Result<Option<WeatherSnapshot>, WeatherError> {
        let forecast_url = self.resolve_forecast_url()?;
        tracing::debug!("NOAA forecast url: {}", forecast_url);

        let forecast: ForecastResponse = self.get_json(&forecast_url, Stage::Forecast)?;
        let snapshot = forecast
            .properties
            .periods
            .first()
            .map(|period| WeatherSnapshot::from_period(period, OffsetDateTime::now_utc()));
        Ok(snapshot)
    }

    fn resolve_forecast_url(&self) -> Result<String, WeatherError> {
        let points: PointsResponse = self.get_json(&self.points_url, Stage::Points)?;
        match points.properties.forecast {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(WeatherError::MissingForecastUrl),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, stage: Stage) -> Result<T, WeatherError> {
        let response = match self.agent.get(url).set("Accept", "application/geo+json").call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(WeatherError::Status(stage, code)),
            Err(ureq::Error::Transport(t)) => {
                return Err(WeatherError::Transport(stage, t.to_string().into()));
            }
        };

        // redirects are followed, anything else but 200 is a failure
        let status = response.status();
        if status != 200 {
            return Err(WeatherError::Status(stage, status));
        }

        let body = response
            .into_string()
            .map_err(|e| WeatherError::Decode(stage, e.into()))?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Decode(stage, e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_url_format() {
        assert_eq!(
            points_url(DEFAULT_BASE_URL, 47.4502, -122.8276),
            "https://api.weather.gov/points/47.4502,-122.8276"
        );
        assert_eq!(
            points_url("http://127.0.0.1:9000/", 1.0, 2.5),
            "http://127.0.0.1:9000/points/1.0000,2.5000"
        );
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        // port 9 (discard) on loopback is closed in test environments
        let client = ForecastClient::new(
            "http://127.0.0.1:9/points/0,0",
            Duration::from_secs(2),
            "pictureframe-test",
        );
        match client.fetch().await {
            Err(WeatherError::Transport(Stage::Points, _)) => {}
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
