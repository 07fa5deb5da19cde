use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    error::{ConfigError, FetchError},
    messages::Message,
    model::{Forecast, ForecastRequest, ForecastResult},
};

use super::WeatherProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const UNKNOWN_ERROR: &str = "Unknown error";

/// OpenWeather "current weather" lookup by ZIP code.
///
/// Holds only immutable settings and a pooled HTTP client, so a single
/// instance can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: Option<String>,
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self { base_url, api_key, http })
    }

    fn settings(&self) -> Result<(&str, &str), ConfigError> {
        let base_url = non_blank(self.base_url.as_deref()).ok_or(ConfigError::MissingBaseUrl)?;
        let api_key = non_blank(self.api_key.as_deref()).ok_or(ConfigError::MissingApiKey)?;
        Ok((base_url, api_key))
    }

    async fn fetch_current(
        &self,
        base_url: &str,
        api_key: &str,
        request: &ForecastRequest,
    ) -> Result<ForecastResult, FetchError> {
        let zip = format!("{},{}", request.zip_code(), request.country());
        debug!(zip_code = request.zip_code(), country = request.country(), "requesting OpenWeather");

        let res = self
            .http
            .get(base_url)
            .query(&[("zip", zip.as_str()), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        let data: Value = serde_json::from_str(&body).map_err(|err| {
            debug!(%status, error = %err, "OpenWeather body is not JSON");
            FetchError::Parse
        })?;

        if !status.is_success() {
            let message = provider_message(&data);
            warn!(%status, %message, zip_code = request.zip_code(), "OpenWeather rejected request");
            return Ok(ForecastResult::Failure { message });
        }

        let envelope: OwCurrentResponse = serde_json::from_value(data)
            .map_err(|err| FetchError::Unexpected(format!("malformed forecast data: {err}")))?;

        Ok(envelope.into_result(request))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_max: f64,
    temp_min: f64,
    humidity: f64,
    sea_level: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: Option<OwMain>,
    weather: Option<Vec<OwWeather>>,
    dt: Option<i64>,
}

impl OwCurrentResponse {
    fn into_result(self, request: &ForecastRequest) -> ForecastResult {
        let first = self.weather.and_then(|list| list.into_iter().next());

        let (Some(main), Some(weather)) = (self.main, first) else {
            return ForecastResult::failure(
                Message::NoDataFound(request.zip_code().to_owned()).to_string(),
            );
        };

        ForecastResult::Success(Forecast {
            temp: main.temp,
            high: main.temp_max,
            low: main.temp_min,
            humidity: main.humidity,
            sea_level: main.sea_level,
            description: weather.description,
            zip_code: request.zip_code().to_owned(),
            country: request.country().to_owned(),
            observed_at: self.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_forecast(&self, request: &ForecastRequest) -> Result<ForecastResult, FetchError> {
        match self.settings() {
            Ok((base_url, api_key)) => self.fetch_current(base_url, api_key, request).await,
            Err(missing) => {
                warn!(error = %missing, "OpenWeather is not configured");
                Ok(ForecastResult::failure(missing.to_string()))
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The provider's own explanation for a rejected request.
fn provider_message(data: &Value) -> String {
    match data.get("message") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Null | Value::String(_)) | None => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}
