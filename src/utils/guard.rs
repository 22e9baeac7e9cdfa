// src/utils/guard.rs

use crate::{
    config::Config,
    utils::{
        image::ImageSanitizer,
        redirect::{RedirectPolicy, RedirectValidator},
    },
};

/// Both URL validators, configured once and shared by every handler.
#[derive(Debug, Clone)]
pub struct UrlGuard {
    pub redirect: RedirectValidator,
    pub image: ImageSanitizer,
}

impl UrlGuard {
    pub fn from_config(config: &Config) -> Self {
        let redirect = RedirectValidator::new(config.site_origin.clone())
            .with_fallback(config.redirect_fallback.clone())
            .with_policy(RedirectPolicy {
                require_http_scheme: config.redirect_strict_scheme,
            });

        Self {
            redirect,
            image: ImageSanitizer::new(config.image_placeholder.clone()),
        }
    }

    pub fn validate_redirect(&self, candidate: &str) -> String {
        self.redirect.validate_redirect(candidate)
    }

    pub fn sanitize_image_url(&self, candidate: Option<&str>) -> String {
        self.image.sanitize_image_url(candidate)
    }
}
