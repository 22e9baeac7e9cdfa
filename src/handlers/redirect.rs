// src/handlers/redirect.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::redirect::{RedirectCheckParams, RedirectCheckResponse, RedirectParams},
    utils::guard::UrlGuard,
};

/// Follows a `next` parameter, e.g. after login.
///
/// Always answers `303 See Other`. A missing or unsafe `next` lands on the
/// fallback route instead of failing.
pub async fn follow(
    State(guard): State<Arc<UrlGuard>>,
    params: Result<Query<RedirectParams>, QueryRejection>,
) -> impl IntoResponse {
    // A garbled query string is treated like a missing `next`.
    let next = params.ok().and_then(|Query(p)| p.next).unwrap_or_default();
    let target = guard.validate_redirect(&next);

    // Targets that cannot be sent as a header (control characters)
    // go to the fallback as well.
    let location = HeaderValue::try_from(target.as_str()).unwrap_or_else(|_| {
        tracing::warn!("Redirect target {:?} is not a valid Location header", target);
        HeaderValue::try_from(guard.redirect.fallback())
            .unwrap_or_else(|_| HeaderValue::from_static("/"))
    });
    tracing::debug!("Redirecting to {:?}", location);

    (StatusCode::SEE_OTHER, [(header::LOCATION, location)])
}

/// Reports how a redirect target would be treated without navigating.
pub async fn check(
    State(guard): State<Arc<UrlGuard>>,
    Query(params): Query<RedirectCheckParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let accepted = guard.redirect.is_safe(&params.target);
    let safe = if accepted {
        params.target.clone()
    } else {
        guard.redirect.fallback().to_string()
    };

    Ok(Json(RedirectCheckResponse {
        target: params.target,
        safe,
        accepted,
    }))
}
