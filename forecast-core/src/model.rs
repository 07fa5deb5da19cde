use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated lookup: trimmed ZIP code and trimmed, uppercased country code.
///
/// Only [`crate::validate::validate()`] builds one, so both fields are always non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastRequest {
    pub(crate) zip_code: String,
    pub(crate) country: String,
}

impl ForecastRequest {
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Cache key shared by every request that normalizes to the same pair.
    pub fn cache_key(&self) -> String {
        format!("forecast_{}_{}", self.zip_code, self.country)
    }
}

/// Current conditions for a ZIP code, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub temp: f64,
    pub high: f64,
    pub low: f64,
    pub humidity: f64,
    pub sea_level: Option<f64>,
    pub description: String,
    pub zip_code: String,
    pub country: String,
    /// Observation time reported by the provider, when it sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

/// Outcome of a provider lookup: either a forecast or a displayable failure message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastResult {
    Success(Forecast),
    Failure { message: String },
}

impl ForecastResult {
    pub fn failure(message: impl Into<String>) -> Self {
        ForecastResult::Failure { message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ForecastResult::Success(_))
    }
}

/// What the caller should show the user after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayOutcome {
    /// Show the forecast along with a success notice.
    Render { forecast: Forecast, notice: String },
    /// Return to the entry point with an alert.
    Redirect { alert: String },
}
