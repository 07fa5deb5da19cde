use crate::{error::ValidationError, model::ForecastRequest};

/// Normalize raw user input into a [`ForecastRequest`].
///
/// Whitespace is trimmed from both fields and the country is uppercased. No
/// format checking is done beyond non-blankness; the provider decides whether
/// a ZIP/country pair exists.
pub fn validate(raw_zip: &str, raw_country: &str) -> Result<ForecastRequest, ValidationError> {
    let zip_code = raw_zip.trim();
    if zip_code.is_empty() {
        return Err(ValidationError::MissingZip);
    }

    let country = raw_country.trim();
    if country.is_empty() {
        return Err(ValidationError::MissingCountry);
    }

    Ok(ForecastRequest {
        zip_code: zip_code.to_owned(),
        country: country.to_uppercase(),
    })
}
