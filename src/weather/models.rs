//! Weather snapshot and NOAA response schemas

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Cached weather served at `/api/weather`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// e.g. "72°F"
    pub temperature: String,
    pub description: String,
    /// Icon URL as returned by the forecast service
    pub icon: String,
    /// `None` until the first successful fetch
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub fetched_at: Option<OffsetDateTime>,
}

impl WeatherSnapshot {
    pub fn from_period(period: &ForecastPeriod, fetched_at: OffsetDateTime) -> Self {
        Self {
            temperature: format!("{}°F", period.temperature),
            description: period.short_forecast.clone(),
            icon: period.icon.clone(),
            fetched_at: Some(fetched_at),
        }
    }

    /// True for the zero snapshot (never fetched)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `/points/{lat},{lon}` response, only the fields we read
#[derive(Deserialize, Debug, Default)]
pub struct PointsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: PointsProperties,
}

#[derive(Deserialize, Debug, Default)]
pub struct PointsProperties {
    /// URL of the forecast for this grid point
    #[serde(default)]
    pub forecast: Option<String>,
}

/// Read an explicit JSON `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Forecast document response
#[derive(Deserialize, Debug, Default)]
pub struct ForecastResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: ForecastProperties,
}

#[derive(Deserialize, Debug, Default)]
pub struct ForecastProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_forecast: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_snapshot_json_field_names() {
        let snapshot = WeatherSnapshot {
            temperature: "72°F".to_string(),
            description: "Sunny".to_string(),
            icon: "sun.png".to_string(),
            fetched_at: Some(datetime!(2025-06-01 12:30:00 UTC)),
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["temperature"], "72°F");
        assert_eq!(value["description"], "Sunny");
        assert_eq!(value["icon"], "sun.png");
        assert_eq!(value["fetchedAt"], "2025-06-01T12:30:00Z");
    }

    #[test]
    fn test_empty_snapshot_serializes_null_timestamp() {
        let value = serde_json::to_value(WeatherSnapshot::default()).unwrap();
        assert!(value["fetchedAt"].is_null());
        assert_eq!(value["temperature"], "");
    }

    #[test]
    fn test_forecast_period_parsing() {
        let body = r#"{"properties":{"periods":[
            {"number":1,"temperature":-3,"shortForecast":"Snow","icon":"snow.png"},
            {"number":2,"temperature":5,"shortForecast":"Cloudy","icon":"cloud.png"}
        ]}}"#;
        let forecast: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(forecast.properties.periods.len(), 2);

        let snapshot = WeatherSnapshot::from_period(
            &forecast.properties.periods[0],
            datetime!(2025-01-01 0:00 UTC),
        );
        assert_eq!(snapshot.temperature, "-3°F");
        assert_eq!(snapshot.description, "Snow");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let body = r#"{"properties":{"periods":[
            {"temperature":72,"shortForecast":null,"icon":null}
        ]}}"#;
        let forecast: ForecastResponse = serde_json::from_str(body).unwrap();
        let period = &forecast.properties.periods[0];
        assert_eq!(period.temperature, 72);
        assert_eq!(period.short_forecast, "");
        assert_eq!(period.icon, "");

        let forecast: ForecastResponse =
            serde_json::from_str(r#"{"properties":{"periods":null}}"#).unwrap();
        assert!(forecast.properties.periods.is_empty());

        let forecast: ForecastResponse = serde_json::from_str(r#"{"properties":null}"#).unwrap();
        assert!(forecast.properties.periods.is_empty());
    }

    #[test]
    fn test_points_missing_forecast() {
        let points: PointsResponse = serde_json::from_str(r#"{"properties":{}}"#).unwrap();
        assert!(points.properties.forecast.is_none());

        let points: PointsResponse = serde_json::from_str("{}").unwrap();
        assert!(points.properties.forecast.is_none());

        let points: PointsResponse =
            serde_json::from_str(r#"{"properties":{"forecast":null}}"#).unwrap();
        assert!(points.properties.forecast.is_none());
    }
}
