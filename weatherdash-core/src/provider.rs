use crate::model::{CurrentConditions, ForecastPoint};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Failures of one fetch cycle. Every variant is terminal for the cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("City name must not be empty")]
    InvalidCity,

    #[error("City not found")]
    CityNotFound { status: StatusCode },

    #[error("Forecast data not available")]
    ForecastUnavailable { status: StatusCode },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request failed: {0}")]
    Transport(String),
}

/// Source of raw weather data for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, FetchError>;

    /// Raw 3-hourly samples, in the order the provider returned them.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastPoint>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_match_the_banner_text() {
        let err = FetchError::CityNotFound {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "City not found");

        let err = FetchError::ForecastUnavailable {
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(err.to_string(), "Forecast data not available");

        let err = FetchError::MalformedResponse("missing field `list`".into());
        assert!(err.to_string().contains("missing field `list`"));
    }
}
