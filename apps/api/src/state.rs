use crate::config::Config;
use crate::layout::{default_page_config, PageConfig};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    /// Page size, margins and font family for every render.
    pub page_config: PageConfig,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let page_config = default_page_config(config.font);
        AppState {
            config,
            page_config,
        }
    }
}
