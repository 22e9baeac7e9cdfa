// src/models/redirect.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /go`.
/// Left unvalidated on purpose: the redirect endpoint always answers with a redirect.
#[derive(Debug, Deserialize)]
pub struct RedirectParams {
    pub next: Option<String>,
}

/// Query string of `GET /api/redirect/check`.
#[derive(Debug, Deserialize, Validate)]
pub struct RedirectCheckParams {
    #[validate(length(max = 2048))]
    pub target: String,
}

/// Outcome of a redirect check.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedirectCheckResponse {
    /// The submitted target.
    pub target: String,
    /// What a client should actually navigate to.
    pub safe: String,
    /// Whether `target` was kept as-is.
    pub accepted: bool,
}
