use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use forecast_core::{Config, DisplayOutcome, Forecast, ForecastService};
use inquire::{CustomType, Password, PasswordDisplayMode, Text};
use std::process::ExitCode;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Current weather by ZIP code")]
pub struct Cli {
    /// Log pipeline activity (cache hits, provider calls) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the provider endpoint, API key and cache expiry.
    Configure,

    /// Print where the configuration file lives.
    ConfigPath,

    /// Show current weather for a ZIP code.
    Show {
        /// ZIP or postal code.
        zip_code: String,

        /// Country code, e.g. "us" or "DE".
        country: String,

        /// Print the forecast as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
            Command::Show { zip_code, country, json } => {
                let config = Config::resolve()?;
                debug!(
                    ttl_minutes = config.cache_expiry_minutes,
                    configured = config.missing().is_none(),
                    "configuration resolved"
                );
                let service = ForecastService::from_config(&config)?;

                match service.submit_forecast_request(&zip_code, &country).await {
                    DisplayOutcome::Render { forecast, notice } => {
                        if json {
                            println!("{}", serde_json::to_string_pretty(&forecast)?);
                        } else {
                            println!("{notice}");
                            print!("{}", format_forecast(&forecast));
                        }
                    }
                    DisplayOutcome::Redirect { alert } => {
                        eprintln!("{alert}");
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let base_url = Text::new("OpenWeather endpoint:")
        .with_default(config.base_url().unwrap_or(DEFAULT_ENDPOINT))
        .prompt()
        .context("Failed to read endpoint")?;

    let api_key = Password::new("API key (leave empty to keep current):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let expiry = CustomType::<u64>::new("Cache expiry (minutes):")
        .with_default(config.cache_expiry_minutes)
        .with_error_message("Please type a whole number of minutes")
        .prompt()
        .context("Failed to read cache expiry")?;

    config.base_url = Some(base_url.trim().to_owned());
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_owned());
    }
    config.cache_expiry_minutes = expiry;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn format_forecast(forecast: &Forecast) -> String {
    let mut out = format!(
        "{}, {}: {}\n  Temperature: {:.1} °C (high {:.1} °C, low {:.1} °C)\n  Humidity:    {}%\n",
        forecast.zip_code,
        forecast.country,
        forecast.description,
        forecast.temp,
        forecast.high,
        forecast.low,
        forecast.humidity,
    );

    if let Some(sea_level) = forecast.sea_level {
        out.push_str(&format!("  Sea level:   {sea_level} hPa\n"));
    }
    if let Some(observed_at) = forecast.observed_at {
        let local = observed_at.with_timezone(&Local);
        out.push_str(&format!("  Observed:    {}\n", local.format("%Y-%m-%d %H:%M")));
    }

    out
}
