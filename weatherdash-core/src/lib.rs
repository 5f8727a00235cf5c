//! Core library for the `weatherdash` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind a provider trait
//! - Aggregation of the 3-hourly forecast into daily summaries
//! - The dashboard state container and its fetch cycle
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod condition;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod provider;

pub use aggregate::{MAX_FORECAST_DAYS, aggregate_daily, aggregate_daily_in};
pub use condition::{Backdrop, ConditionIcon, Theme};
pub use config::Config;
pub use dashboard::{CycleTicket, Dashboard, DashboardState, WeatherSnapshot, fetch_weather};
pub use model::{CurrentConditions, DailyForecastSummary, ForecastPoint};
pub use provider::{FetchError, OpenWeatherProvider, WeatherProvider};
