//! Collapses the 3-hourly forecast feed into one summary per calendar day.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, TimeZone};
use tracing::warn;

use crate::model::{DailyForecastSummary, ForecastPoint, TempRange};

/// Number of daily summaries kept after aggregation.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Aggregate using the local calendar day of the machine running the dashboard.
pub fn aggregate_daily(points: &[ForecastPoint]) -> Vec<DailyForecastSummary> {
    aggregate_daily_in(points, &Local)
}

/// Aggregate, bucketing each sample by its calendar day in `tz`.
///
/// The first sample seen for a day fixes every field except the temperature
/// range, which tracks the lowest `temp_min` and highest `temp_max` of all
/// samples for that day. Days come out in first-seen order, at most
/// [`MAX_FORECAST_DAYS`] of them.
pub fn aggregate_daily_in<Tz: TimeZone>(
    points: &[ForecastPoint],
    tz: &Tz,
) -> Vec<DailyForecastSummary> {
    let mut days: Vec<DailyForecastSummary> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for point in points {
        let Some(date) = day_key(point.dt, tz) else {
            warn!(dt = point.dt, "Skipping forecast sample with unrepresentable timestamp");
            continue;
        };

        if let Some(&slot) = index.get(&date) {
            let temp = &mut days[slot].temp;
            if point.main.temp_min < temp.min {
                temp.min = point.main.temp_min;
            }
            if point.main.temp_max > temp.max {
                temp.max = point.main.temp_max;
            }
            continue;
        }

        if point.weather.is_empty() {
            warn!(dt = point.dt, "Forecast sample opens a day without a weather condition");
        }

        index.insert(date, days.len());
        days.push(DailyForecastSummary {
            date,
            temp: TempRange {
                min: point.main.temp_min,
                max: point.main.temp_max,
            },
            weather: point.primary_condition().cloned(),
            wind: point.wind,
            precipitation: point.pop * 100.0,
            humidity: point.main.humidity,
            pressure: point.main.pressure,
            visibility: point.visibility,
            clouds: point.clouds.all,
        });
    }

    days.truncate(MAX_FORECAST_DAYS);
    days
}

fn day_key<Tz: TimeZone>(ts: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_opt(ts, 0).earliest().map(|dt| dt.date_naive())
}
