//! Typed mirrors of the OpenWeather payloads plus the derived daily summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry of the provider's `weather` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub main: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Metres per second (metric units).
    pub speed: f64,
    pub deg: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clouds {
    /// Coverage in percent.
    pub all: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sys {
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grnd_level: Option<u32>,
}

/// Accumulation over the last hour, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accumulation {
    #[serde(rename = "1h", default, skip_serializing_if = "Option::is_none")]
    pub one_hour: Option<f64>,
}

/// Response of the current-conditions endpoint, kept as the provider sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub sys: Sys,
    pub weather: Vec<Condition>,
    pub main: CurrentMain,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Metres.
    pub visibility: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Accumulation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snow: Option<Accumulation>,
}

impl CurrentConditions {
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastMain {
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u8,
}

/// One 3-hour sample of the forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Unix seconds.
    pub dt: i64,
    pub main: ForecastMain,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    /// Probability of precipitation as a 0..=1 fraction.
    #[serde(default)]
    pub pop: f64,
    #[serde(default)]
    pub visibility: Option<u32>,
    pub clouds: Clouds,
}

impl ForecastPoint {
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempRange {
    pub min: f64,
    pub max: f64,
}

/// One calendar day collapsed out of the forecast feed.
///
/// Only `temp` is aggregated; every other field is copied from the first
/// sample seen for the day, including a missing `weather` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastSummary {
    pub date: NaiveDate,
    pub temp: TempRange,
    pub weather: Option<Condition>,
    pub wind: Wind,
    /// Probability of precipitation in percent.
    pub precipitation: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub visibility: Option<u32>,
    pub clouds: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_conditions_parse_optional_fields() {
        let json = serde_json::json!({
            "name": "London",
            "sys": { "country": "GB", "sunrise": 1700000000, "sunset": 1700030000 },
            "weather": [{ "id": 501, "main": "Rain", "description": "moderate rain", "icon": "10d" }],
            "main": {
                "temp": 7.5, "feels_like": 4.2, "temp_min": 6.0, "temp_max": 9.1,
                "pressure": 1008, "humidity": 87, "sea_level": 1008
            },
            "wind": { "speed": 5.1, "deg": 240 },
            "clouds": { "all": 90 },
            "visibility": 8000,
            "rain": { "1h": 1.2 }
        });

        let current: CurrentConditions = serde_json::from_value(json).unwrap();

        assert_eq!(current.primary_condition().map(|c| c.id), Some(501));
        assert_eq!(current.main.sea_level, Some(1008));
        assert_eq!(current.main.grnd_level, None);
        assert_eq!(current.wind.gust, None);
        assert_eq!(current.rain.and_then(|r| r.one_hour), Some(1.2));
        assert!(current.snow.is_none());
    }

    #[test]
    fn forecast_point_defaults_missing_pop_and_visibility() {
        let json = serde_json::json!({
            "dt": 1700000000,
            "main": { "temp_min": 1.0, "temp_max": 3.0, "pressure": 1012, "humidity": 70 },
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }],
            "wind": { "speed": 2.0, "deg": 90, "gust": 4.5 },
            "clouds": { "all": 0 }
        });

        let point: ForecastPoint = serde_json::from_value(json).unwrap();

        assert_eq!(point.pop, 0.0);
        assert_eq!(point.visibility, None);
        assert_eq!(point.wind.gust, Some(4.5));
        assert_eq!(point.weather[0].icon, "");
    }
}
