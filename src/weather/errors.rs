//! Weather fetch errors

use std::fmt;
use std::fmt::Display;

/// Which of the two upstream requests failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Points,
    Forecast,
}

impl Display for Stage {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stage::Points => "points".fmt(fmt),
            Stage::Forecast => "forecast".fmt(fmt),
        }
    }
}

/// Failures of one refresh cycle. None of these touch the cached snapshot.
#[derive(Debug)]
pub enum WeatherError {
    /// Connection, DNS, TLS or timeout failure
    Transport(Stage, crate::Error),

    /// Upstream answered with something other than 200
    Status(Stage, u16),

    /// Body could not be read or was not the expected JSON
    Decode(Stage, crate::Error),

    /// Points response carried no `properties.forecast`
    MissingForecastUrl,

    /// The blocking fetch worker panicked or was cancelled
    Worker(crate::Error),
}

impl std::error::Error for WeatherError {}

impl Display for WeatherError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WeatherError::Transport(stage, e) => write!(fmt, "NOAA {} request failed: {}", stage, e),
            WeatherError::Status(stage, code) => write!(fmt, "NOAA {} status: {}", stage, code),
            WeatherError::Decode(stage, e) => write!(fmt, "NOAA {} response invalid: {}", stage, e),
            WeatherError::MissingForecastUrl => "no forecast URL in NOAA points response".fmt(fmt),
            WeatherError::Worker(e) => write!(fmt, "weather fetch worker failed: {}", e),
        }
    }
}
