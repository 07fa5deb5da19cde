use thiserror::Error;

use crate::messages::Message;

/// Rejection of user input, raised before any external call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", Message::EnterZip)]
    MissingZip,
    #[error("{}", Message::EnterCountry)]
    MissingCountry,
}

/// Provider configuration that is absent or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{}", Message::MissingBaseUrl)]
    MissingBaseUrl,
    #[error("{}", Message::MissingApiKey)]
    MissingApiKey,
}

/// Failures inside the fetch/parse pipeline that never produced a provider answer.
///
/// These are surfaced to the user but are never cached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{}", Message::ParsingError)]
    Parse,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let network = err.is_connect() || err.is_timeout() || err.is_request() || err.is_body();
        let cause = describe(err);

        if network { FetchError::Network(cause) } else { FetchError::Unexpected(cause) }
    }
}

/// Flatten an HTTP error and its sources into one line.
///
/// The request URL is dropped because its query string carries the API key.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut cause = err.to_string();
    let mut source = std::error::Error::source(&err);

    while let Some(inner) = source {
        cause.push_str(": ");
        cause.push_str(&inner.to_string());
        source = inner.source();
    }

    cause
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_carry_their_cause() {
        assert_eq!(
            FetchError::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            FetchError::Unexpected("boom".into()).to_string(),
            "Unexpected error: boom"
        );
        assert_eq!(FetchError::Parse.to_string(), "Error parsing forecast data");
    }

    #[test]
    fn validation_errors_render_prompts() {
        assert_eq!(ValidationError::MissingZip.to_string(), Message::EnterZip.to_string());
        assert_eq!(
            ValidationError::MissingCountry.to_string(),
            Message::EnterCountry.to_string()
        );
    }
}
