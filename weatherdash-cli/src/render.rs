//! Plain-text rendering of the dashboard state.

use std::fmt::{self, Write};

use chrono::{Local, TimeZone};
use weatherdash_core::{
    Backdrop, ConditionIcon, CurrentConditions, DailyForecastSummary, DashboardState,
    MAX_FORECAST_DAYS,
};

const RULE: &str = "────────────────────────────────────────────";

/// Printable dashboard; build with [`dashboard`].
pub struct DashboardView<'a, Tz> {
    state: &'a DashboardState,
    backdrop: &'a Backdrop,
    tz: Tz,
}

pub fn dashboard<'a>(state: &'a DashboardState, backdrop: &'a Backdrop) -> DashboardView<'a, Local> {
    DashboardView {
        state,
        backdrop,
        tz: Local,
    }
}

impl<Tz: TimeZone> fmt::Display for DashboardView<'_, Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        write_header(f, &state.city, self.backdrop)?;

        if let Some(error) = &state.error {
            writeln!(f, " ⚠  {error}")?;
            writeln!(f, "{RULE}")?;
        }

        if state.loading {
            return write_loading(f, &state.city);
        }

        if let Some(current) = &state.current {
            write_conditions_card(f, current, &self.tz)?;
        }

        if let Some(forecast) = &state.forecast {
            writeln!(f)?;
            writeln!(f, " 5-Day Forecast")?;
            write_forecast_row(f, forecast)?;
        }

        Ok(())
    }
}

fn write_header(out: &mut impl Write, city: &str, backdrop: &Backdrop) -> fmt::Result {
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        " weatherdash · {city} · [{} · {} particles]",
        backdrop.theme, backdrop.particles
    )?;
    writeln!(out, " backdrop {}", backdrop.image)?;
    writeln!(out, "{RULE}")
}

fn write_loading(out: &mut impl Write, city: &str) -> fmt::Result {
    writeln!(out, " Loading weather for {city}...")?;
    writeln!(out)?;
    writeln!(out, " 5-Day Forecast")?;
    let placeholders = vec!["[ ······ ]"; MAX_FORECAST_DAYS];
    writeln!(out, " {}", placeholders.join(" "))
}

fn write_conditions_card<Tz: TimeZone>(
    out: &mut impl Write,
    current: &CurrentConditions,
    tz: &Tz,
) -> fmt::Result
where
    Tz::Offset: fmt::Display,
{
    let location = match current.sys.country.as_deref() {
        Some(country) => format!("{}, {country}", current.name),
        None => current.name.clone(),
    };
    let (glyph, description) = current
        .primary_condition()
        .map(|c| (ConditionIcon::from_code(c.id).glyph(), c.description.as_str()))
        .unwrap_or(("", ""));

    let main = &current.main;
    writeln!(out, " {location}")?;
    writeln!(
        out,
        " {glyph}  {}°C  {}",
        round_half_up(main.temp),
        capitalize(description)
    )?;
    writeln!(
        out,
        " Feels like {}°C · H {}° · L {}°",
        round_half_up(main.feels_like),
        round_half_up(main.temp_max),
        round_half_up(main.temp_min)
    )?;
    writeln!(out)?;
    writeln!(out, " Humidity    {}%", main.humidity)?;

    write!(out, " Wind        {} km/h", kmh(current.wind.speed))?;
    if let Some(gust) = current.wind.gust {
        write!(out, " (gust {} km/h)", kmh(gust))?;
    }
    writeln!(out, " from {}°", current.wind.deg)?;

    writeln!(
        out,
        " Conditions  {}% clouds · vis {} km",
        current.clouds.all,
        visibility_km(current.visibility)
    )?;
    if let Some(mm) = current.rain.and_then(|r| r.one_hour) {
        writeln!(out, " Rain        {mm} mm")?;
    }
    if let Some(mm) = current.snow.and_then(|s| s.one_hour) {
        writeln!(out, " Snow        {mm} mm")?;
    }

    writeln!(out, " Pressure    {} hPa", main.pressure)?;
    if let Some(sea) = main.sea_level {
        writeln!(out, "   sea level {sea} hPa")?;
    }
    if let Some(ground) = main.grnd_level {
        writeln!(out, "   ground    {ground} hPa")?;
    }

    writeln!(out)?;
    writeln!(
        out,
        " Sunrise {}   Sunset {}",
        clock(current.sys.sunrise, tz),
        clock(current.sys.sunset, tz)
    )
}

fn write_forecast_row(out: &mut impl Write, days: &[DailyForecastSummary]) -> fmt::Result {
    for day in days {
        // A day opened by a sample without a condition renders with the default icon.
        let (code, description) = day
            .weather
            .as_ref()
            .map_or((0, "unknown"), |c| (c.id, c.description.as_str()));

        writeln!(
            out,
            " {:<3} {:<6}  {}  {:>3}° {:>3}°  {}",
            day.date.format("%a"),
            day.date.format("%b %-d"),
            ConditionIcon::from_code(code).glyph(),
            round_half_up(day.temp.max),
            round_half_up(day.temp.min),
            capitalize(description)
        )?;
    }
    Ok(())
}

/// Rounds .5 towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn kmh(mps: f64) -> i64 {
    round_half_up(mps * 3.6)
}

fn visibility_km(metres: u32) -> i64 {
    round_half_up(f64::from(metres) / 1000.0)
}

/// `HH:MM` of a Unix timestamp; blank if out of range.
fn clock<Tz: TimeZone>(ts: i64, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    tz.timestamp_opt(ts, 0)
        .earliest()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
