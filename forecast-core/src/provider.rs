use async_trait::async_trait;
use std::fmt::Debug;
use tracing::warn;

use crate::{
    Config, ForecastRequest, ForecastResult, error::FetchError,
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Source of current conditions for a validated request.
///
/// A provider answers with [`ForecastResult::Failure`] for anything it can
/// explain to the user (missing configuration, provider rejections, empty
/// payloads) and with a [`FetchError`] when the exchange itself broke down.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_forecast(&self, request: &ForecastRequest) -> Result<ForecastResult, FetchError>;
}

/// Construct the provider once at startup from resolved configuration.
///
/// Missing provider settings are not an error here; they surface as a
/// failure result on the first lookup.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    if let Some(missing) = config.missing() {
        warn!(error = %missing, "forecast provider is not fully configured");
    }

    let provider = OpenWeatherProvider::new(
        config.base_url().map(str::to_owned),
        config.api_key().map(str::to_owned),
    )?;

    Ok(Box::new(provider))
}
