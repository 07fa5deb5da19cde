use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

use crate::{
    Config,
    cache::ForecastCache,
    error::FetchError,
    messages::Message,
    model::{DisplayOutcome, ForecastRequest, ForecastResult},
    provider::{WeatherProvider, provider_from_config},
    validate::validate,
};

/// Entry point for callers holding two raw strings from a form or command line.
///
/// Wires validation, the shared cache and the provider together and turns
/// every outcome into something displayable.
#[derive(Debug, Clone)]
pub struct ForecastService {
    provider: Arc<dyn WeatherProvider>,
    cache: ForecastCache,
    ttl: Duration,
}

impl ForecastService {
    pub fn new(provider: Arc<dyn WeatherProvider>, cache: ForecastCache, ttl: Duration) -> Self {
        Self { provider, cache, ttl }
    }

    /// Build the service with the OpenWeather provider and an in-memory cache.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = provider_from_config(config)?;
        Ok(Self::new(provider.into(), ForecastCache::default(), config.cache_ttl()))
    }

    pub fn cache(&self) -> &ForecastCache {
        &self.cache
    }

    /// Validate, look up and map a submission to what the user should see.
    pub async fn submit_forecast_request(&self, zip_code: &str, country: &str) -> DisplayOutcome {
        let request = match validate(zip_code, country) {
            Ok(request) => request,
            Err(err) => {
                info!(error = %err, "rejected forecast request");
                return DisplayOutcome::Redirect { alert: err.to_string() };
            }
        };

        match self.fetch_forecast(&request).await {
            Ok(ForecastResult::Success(forecast)) => {
                info!(
                    zip_code = request.zip_code(),
                    country = request.country(),
                    "forecast ready"
                );
                DisplayOutcome::Render { forecast, notice: Message::Success.to_string() }
            }
            Ok(ForecastResult::Failure { message }) => {
                warn!(
                    zip_code = request.zip_code(),
                    country = request.country(),
                    %message,
                    "forecast unavailable"
                );
                DisplayOutcome::Redirect { alert: Message::Error(message).to_string() }
            }
            Err(err) => {
                warn!(
                    zip_code = request.zip_code(),
                    country = request.country(),
                    error = %err,
                    "forecast lookup failed"
                );
                DisplayOutcome::Redirect { alert: Message::Error(err.to_string()).to_string() }
            }
        }
    }

    /// Cached provider lookup for an already validated request.
    pub async fn fetch_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastResult, FetchError> {
        self.cache
            .fetch_or_compute(&request.cache_key(), self.ttl, || {
                self.provider.get_forecast(request)
            })
            .await
    }
}
