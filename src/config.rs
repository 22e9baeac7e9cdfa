// src/config.rs

use std::env;
use std::net::SocketAddr;

use crate::{
    error::AppError,
    utils::{
        image::DEFAULT_IMAGE_PLACEHOLDER,
        origin::SiteOrigin,
        redirect::{DEFAULT_REDIRECT_FALLBACK, is_local_path},
    },
};

#[derive(Debug, Clone)]
pub struct Config {
    pub site_origin: SiteOrigin,
    pub redirect_fallback: String,
    pub redirect_strict_scheme: bool,
    pub image_placeholder: String,
    pub bind_addr: SocketAddr,
    pub rust_log: String,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let site_origin = SiteOrigin::parse(&var("SITE_ORIGIN", "http://localhost:3000"))?;

        let redirect_fallback = var("REDIRECT_FALLBACK", DEFAULT_REDIRECT_FALLBACK);
        if !is_local_path(&redirect_fallback) {
            return Err(AppError::Config(format!(
                "REDIRECT_FALLBACK '{}' must be a path starting with a single '/'",
                redirect_fallback
            )));
        }

        let redirect_strict_scheme = match var("REDIRECT_STRICT_SCHEME", "true")
            .to_ascii_lowercase()
            .as_str()
        {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(AppError::Config(format!(
                    "REDIRECT_STRICT_SCHEME '{}' is not a boolean",
                    other
                )));
            }
        };

        let image_placeholder = var("IMAGE_PLACEHOLDER", DEFAULT_IMAGE_PLACEHOLDER);

        let bind_addr = var("BIND_ADDR", "0.0.0.0:3000")
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR: {}", e)))?;

        let rust_log = var("RUST_LOG", "info");

        Ok(Self {
            site_origin,
            redirect_fallback,
            redirect_strict_scheme,
            image_placeholder,
            bind_addr,
            rust_log,
        })
    }
}
