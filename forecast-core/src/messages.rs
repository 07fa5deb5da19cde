use std::fmt;

/// User-facing message catalogue.
///
/// Every alert or notice the pipeline produces is rendered from one of these
/// templates, so callers never have to format provider or validation errors
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    EnterZip,
    EnterCountry,
    Success,
    Error(String),
    ParsingError,
    MissingBaseUrl,
    MissingApiKey,
    NoDataFound(String),
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::EnterZip => f.write_str("Please enter a ZIP code."),
            Message::EnterCountry => f.write_str("Please enter a country code."),
            Message::Success => f.write_str("Forecast retrieved successfully."),
            Message::Error(reason) => write!(f, "Unable to retrieve forecast: {reason}"),
            Message::ParsingError => f.write_str("Error parsing forecast data"),
            Message::MissingBaseUrl => f.write_str("Weather API base URL is not configured"),
            Message::MissingApiKey => f.write_str("OpenWeather API key is not configured"),
            Message::NoDataFound(zip) => write!(f, "No forecast data found for ZIP code {zip}"),
        }
    }
}
