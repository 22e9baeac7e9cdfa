// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

// Re-export the validators for library callers that do not need the HTTP layer.
pub use routes::create_router;
pub use utils::{
    guard::UrlGuard,
    image::{ImageSanitizer, sanitize_image_url},
    origin::SiteOrigin,
    redirect::{RedirectPolicy, RedirectValidator, validate_redirect},
};
