//! Dashboard session state and the fetch cycle that feeds it.
//!
//! A fetch cycle clears the view, asks the provider for current conditions
//! and then for the forecast, and replaces the state wholesale with the
//! outcome. Overlapping cycles are ordered by a generation counter: only the
//! most recently started cycle may commit, older results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    aggregate::aggregate_daily,
    model::{CurrentConditions, DailyForecastSummary},
    provider::{FetchError, WeatherProvider},
};

/// Everything the front end renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub city: String,
    pub current: Option<CurrentConditions>,
    pub forecast: Option<Vec<DailyForecastSummary>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardState {
    /// Condition code driving the icon and theme, once conditions have loaded.
    pub fn condition_code(&self) -> Option<u32> {
        self.current
            .as_ref()
            .and_then(CurrentConditions::primary_condition)
            .map(|c| c.id)
    }
}

/// Successful result of one fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecastSummary>,
}

/// Handle for a started cycle; carries the generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTicket {
    generation: u64,
    city: String,
}

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Fetch current conditions, then the forecast, then aggregate.
///
/// Stops at the first failure; the forecast is never requested when the
/// current-conditions call fails.
pub async fn fetch_weather<P>(provider: &P, city: &str) -> Result<WeatherSnapshot, FetchError>
where
    P: WeatherProvider + ?Sized,
{
    let city = city.trim();
    if city.is_empty() {
        return Err(FetchError::InvalidCity);
    }

    let current = provider.fetch_current(city).await?;
    let points = provider.fetch_forecast(city).await?;
    let forecast = aggregate_daily(&points);

    Ok(WeatherSnapshot { current, forecast })
}

#[derive(Debug)]
pub struct Dashboard<P> {
    provider: P,
    state: Mutex<DashboardState>,
    generation: AtomicU64,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(provider: P, initial_city: impl Into<String>) -> Self {
        Self {
            provider,
            state: Mutex::new(DashboardState {
                city: initial_city.into(),
                ..DashboardState::default()
            }),
            generation: AtomicU64::new(0),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().clone()
    }

    pub fn city(&self) -> String {
        self.state.lock().city.clone()
    }

    /// Set the target city from a search box. Blank input is ignored.
    pub fn submit_search(&self, query: &str) -> Option<String> {
        let city = query.trim();
        if city.is_empty() {
            return None;
        }

        self.state.lock().city = city.to_string();
        Some(city.to_string())
    }

    /// Start a cycle: the view goes to an empty loading state.
    pub fn begin_cycle(&self, city: &str) -> CycleTicket {
        let city = city.trim();
        let mut state = self.state.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        state.city = city.to_string();
        state.current = None;
        state.forecast = None;
        state.loading = true;
        state.error = None;

        debug!(generation, city, "Fetch cycle started");
        CycleTicket {
            generation,
            city: city.to_string(),
        }
    }

    /// Commit the outcome of a cycle. Returns `false` if a newer cycle has
    /// started since `ticket` was issued, in which case nothing changes.
    pub fn complete_cycle(
        &self,
        ticket: &CycleTicket,
        outcome: Result<WeatherSnapshot, FetchError>,
    ) -> bool {
        let mut state = self.state.lock();

        // Generation only moves while the state lock is held.
        let latest = self.generation.load(Ordering::SeqCst);
        if ticket.generation != latest {
            debug!(
                generation = ticket.generation,
                latest,
                city = %ticket.city,
                "Discarding stale fetch cycle"
            );
            return false;
        }

        match outcome {
            Ok(snapshot) => {
                info!(
                    city = %ticket.city,
                    days = snapshot.forecast.len(),
                    "Weather loaded"
                );
                state.current = Some(snapshot.current);
                state.forecast = Some(snapshot.forecast);
                state.error = None;
            }
            Err(err) => {
                warn!(city = %ticket.city, error = %err, "Fetch cycle failed");
                state.current = None;
                state.forecast = None;
                state.error = Some(err.to_string());
            }
        }
        state.loading = false;
        true
    }

    /// Run a full cycle for `city` and return the state it left behind.
    pub async fn load(&self, city: &str) -> DashboardState {
        let ticket = self.begin_cycle(city);
        let outcome = fetch_weather(&self.provider, ticket.city()).await;
        self.complete_cycle(&ticket, outcome);
        self.snapshot()
    }

    /// Reload whatever city is currently targeted.
    pub async fn refresh(&self) -> DashboardState {
        let city = self.city();
        self.load(&city).await
    }
}
