use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    config::DEFAULT_BASE_URL,
    model::{CurrentConditions, ForecastPoint, ForecastResponse},
};

use super::{FetchError, WeatherProvider};

/// OpenWeather 2.5 client; always requests metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// GET `{base_url}/{endpoint}` and return the status with the raw body.
    async fn get(&self, endpoint: &str, city: &str) -> Result<(StatusCode, String), FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(url = %url, "Requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        debug!(%status, body = %truncate_body(&body), "OpenWeather responded");
        Ok((status, body))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let (status, body) = self.get("weather", city).await?;

        if !status.is_success() {
            return Err(FetchError::CityNotFound { status });
        }

        let parsed: CurrentConditions = parse_body(&body, "current conditions")?;
        if parsed.weather.is_empty() {
            return Err(FetchError::MalformedResponse(
                "current conditions contained no weather entry".to_string(),
            ));
        }

        Ok(parsed)
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastPoint>, FetchError> {
        let (status, body) = self.get("forecast", city).await?;

        if !status.is_success() {
            return Err(FetchError::ForecastUnavailable { status });
        }

        let parsed: ForecastResponse = parse_body(&body, "forecast")?;
        if let Some(bare) = parsed.list.iter().find(|p| p.weather.is_empty()) {
            return Err(FetchError::MalformedResponse(format!(
                "forecast sample at {} contained no weather entry",
                bare.dt
            )));
        }

        debug!(samples = parsed.list.len(), "Parsed forecast");
        Ok(parsed.list)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, FetchError> {
    serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("Failed to parse {what} JSON: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenWeatherProvider::with_base_url("KEY".into(), "http://localhost:1234/");
        assert_eq!(provider.base_url, "http://localhost:1234");

        let provider = OpenWeatherProvider::new("KEY".into());
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let short = "ok";
        assert_eq!(truncate_body(short), "ok");

        let long = "é".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    #[test]
    fn parse_body_maps_to_malformed_response() {
        let err = parse_body::<ForecastResponse>("{\"cod\":\"200\"}", "forecast").unwrap_err();
        match err {
            FetchError::MalformedResponse(msg) => assert!(msg.contains("forecast")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
