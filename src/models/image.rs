// src/models/image.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /api/images/sanitize`.
#[derive(Debug, Deserialize, Validate)]
pub struct ImageParams {
    #[validate(length(max = 2048))]
    pub src: Option<String>,
}

/// DTO for sanitizing several image sources at once.
#[derive(Debug, Deserialize, Validate)]
pub struct SanitizeImagesRequest {
    #[validate(
        length(min = 1, max = 100, message = "Between 1 and 100 URLs per request."),
        custom(function = validate_url_lengths)
    )]
    pub urls: Vec<String>,
}

/// A single sanitized image source.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SanitizedImage {
    /// Value safe to place in a `src` attribute; empty means "no image".
    pub src: String,
    /// Whether the submitted value was kept as-is.
    pub accepted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SanitizeImagesResponse {
    pub urls: Vec<SanitizedImage>,
}

/// Rejects any entry longer than a browser would reasonably accept.
fn validate_url_lengths(urls: &[String]) -> Result<(), validator::ValidationError> {
    if urls.iter().any(|url| url.len() > 2048) {
        return Err(validator::ValidationError::new("url_too_long"));
    }
    Ok(())
}
