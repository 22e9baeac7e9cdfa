use std::sync::Arc;

use crate::{config::Config, utils::guard::UrlGuard};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<UrlGuard>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            guard: Arc::new(UrlGuard::from_config(&config)),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<UrlGuard> {
    fn from_ref(state: &AppState) -> Self {
        state.guard.clone()
    }
}
