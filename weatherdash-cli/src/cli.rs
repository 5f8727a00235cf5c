use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use serde::Serialize;
use weatherdash_core::{
    Backdrop, Config, Dashboard, DashboardState, OpenWeatherProvider, fetch_weather,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default city.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Print the dashboard state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactive dashboard: search cities until Esc / Ctrl-C.
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(city, json).await,
            Command::Dashboard => interactive().await,
        }
    }
}

fn build_dashboard(config: &Config, city: &str) -> anyhow::Result<Dashboard<OpenWeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::with_base_url(api_key, config.base_url());
    Ok(Dashboard::new(provider, city))
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    config.set_api_key(api_key);

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(ExitCode::SUCCESS)
}

async fn show(city: Option<String>, json: bool) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let city = city.unwrap_or_else(|| config.default_city().to_string());
    let dashboard = build_dashboard(&config, &city)?;

    let state = dashboard.refresh().await;
    print_state(&state, json)?;

    Ok(exit_code(&state))
}

async fn interactive() -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let dashboard = build_dashboard(&config, config.default_city())?;

    let mut city = dashboard.city();
    loop {
        let ticket = dashboard.begin_cycle(&city);
        print_state(&dashboard.snapshot(), false)?;

        let outcome = fetch_weather(dashboard.provider(), ticket.city()).await;
        dashboard.complete_cycle(&ticket, outcome);
        print_state(&dashboard.snapshot(), false)?;

        match next_search(&dashboard).await? {
            Some(next) => city = next,
            None => break,
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Prompt until a non-blank query arrives. `None` means the user quit.
async fn next_search(
    dashboard: &Dashboard<OpenWeatherProvider>,
) -> anyhow::Result<Option<String>> {
    while let Some(query) = prompt_search().await? {
        if let Some(city) = dashboard.submit_search(&query) {
            return Ok(Some(city));
        }
    }
    Ok(None)
}

/// `None` when the user cancels the prompt.
async fn prompt_search() -> anyhow::Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(|| {
        Text::new("Search city:")
            .with_help_message("Esc or Ctrl-C to quit")
            .prompt()
    })
    .await
    .context("Search prompt task failed")?;

    match answer {
        Ok(query) => Ok(Some(query)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read search query"),
    }
}

/// JSON shape of `show --json`: the state plus its decoration.
#[derive(Debug, Serialize)]
struct JsonView<'a> {
    #[serde(flatten)]
    state: &'a DashboardState,
    backdrop: &'a Backdrop,
}

fn print_state(state: &DashboardState, json: bool) -> anyhow::Result<()> {
    let backdrop = Backdrop::new(state.condition_code(), backdrop_pick());

    if json {
        let view = JsonView {
            state,
            backdrop: &backdrop,
        };
        let out = serde_json::to_string_pretty(&view).context("Failed to serialize dashboard state")?;
        println!("{out}");
    } else {
        println!("{}", render::dashboard(state, &backdrop));
    }
    Ok(())
}

/// Photo index within the theme's set; varies from run to run.
fn backdrop_pick() -> usize {
    chrono::Utc::now().timestamp_subsec_millis() as usize
}

fn exit_code(state: &DashboardState) -> ExitCode {
    if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_view_flattens_state_and_adds_backdrop() {
        let state = DashboardState {
            city: "Paris".into(),
            error: Some("City not found".into()),
            ..DashboardState::default()
        };
        let backdrop = Backdrop::new(state.condition_code(), 2);

        let json = serde_json::to_value(JsonView {
            state: &state,
            backdrop: &backdrop,
        })
        .unwrap();

        assert_eq!(json["city"], "Paris");
        assert_eq!(json["loading"], false);
        assert_eq!(json["error"], "City not found");
        assert_eq!(json["backdrop"]["theme"], "clear");
        assert_eq!(json["backdrop"]["particles"], 15);
        assert!(json["backdrop"]["image"].as_str().unwrap().contains("w=1920"));
    }
}
