//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Input validation for ZIP/country submissions
//! - A time-bounded forecast cache
//! - The OpenWeather lookup and its error mapping
//! - Configuration, user-facing messages and the submit pipeline
//!
//! It is used by `forecast-cli`, but the [`ForecastService`] can be embedded in
//! any front end that collects two strings and displays a [`DisplayOutcome`].

pub mod cache;
pub mod config;
pub mod error;
pub mod messages;
pub mod model;
pub mod provider;
pub mod service;
pub mod validate;

pub use cache::{CacheStore, ForecastCache, MemoryStore};
pub use config::Config;
pub use error::{ConfigError, FetchError, ValidationError};
pub use messages::Message;
pub use model::{DisplayOutcome, Forecast, ForecastRequest, ForecastResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use service::ForecastService;
pub use validate::validate;
