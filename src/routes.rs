// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{image, redirect},
    state::AppState,
};

/// Assembles the main application router.
///
/// * `/go` performs validated redirects.
/// * `/api/redirect` and `/api/images` expose the validators as JSON endpoints.
/// * Applies global middleware (Trace, CORS limited to the site origin).
pub fn create_router(state: AppState) -> Router {
    let cors = match HeaderValue::from_str(&state.config.site_origin.as_str()) {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(e) => {
            tracing::warn!("Site origin is not a valid header value, CORS disabled: {}", e);
            CorsLayer::new()
        }
    }
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([axum::http::header::CONTENT_TYPE]);

    let redirect_routes = Router::new().route("/check", get(redirect::check));

    let image_routes = Router::new().route(
        "/sanitize",
        get(image::sanitize).post(image::sanitize_batch),
    );

    Router::new()
        .route("/go", get(redirect::follow))
        .nest("/api/redirect", redirect_routes)
        .nest("/api/images", image_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
