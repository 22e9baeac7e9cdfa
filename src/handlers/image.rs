// src/handlers/image.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::image::{ImageParams, SanitizeImagesRequest, SanitizeImagesResponse, SanitizedImage},
    utils::guard::UrlGuard,
};

/// `accepted` reflects the policy decision, not string equality: a submitted
/// value that happens to equal the placeholder is still a rejection.
fn sanitize_one(guard: &UrlGuard, src: Option<&str>) -> SanitizedImage {
    let (safe, accepted) = match src {
        None | Some("") => (String::new(), true),
        Some(s) if guard.image.is_allowed(s) => (s.to_string(), true),
        Some(_) => (guard.image.placeholder().to_string(), false),
    };
    SanitizedImage {
        src: safe,
        accepted,
    }
}

/// Sanitizes a single image source given as `?src=`.
pub async fn sanitize(
    State(guard): State<Arc<UrlGuard>>,
    Query(params): Query<ImageParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    Ok(Json(sanitize_one(&guard, params.src.as_deref())))
}

/// Sanitizes a batch of image sources, e.g. a gallery or a list of avatars.
/// Output order matches input order.
pub async fn sanitize_batch(
    State(guard): State<Arc<UrlGuard>>,
    Json(payload): Json<SanitizeImagesRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let urls = payload
        .urls
        .iter()
        .map(|url| sanitize_one(&guard, Some(url)))
        .collect();

    Ok(Json(SanitizeImagesResponse { urls }))
}
