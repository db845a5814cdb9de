//! Cached weather from the NOAA forecast service
//!
//! [`WeatherRefresher`] fetches on a fixed interval and swaps the result into
//! [`WeatherCache`]. A failed cycle only logs; readers keep getting the last
//! good snapshot.

pub mod cache;
pub mod client;
pub mod errors;
pub mod models;
pub mod refresher;

pub use cache::WeatherCache;
pub use client::ForecastClient;
pub use errors::WeatherError;
pub use models::WeatherSnapshot;
pub use refresher::{RefreshOutcome, WeatherRefresher};
