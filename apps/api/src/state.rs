use std::sync::Arc;

use crate::config::Config;
use crate::conversion::assemble::PageConfig;
use crate::conversion::logo::LogoImage;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; every conversion is request-scoped.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Company logo decoded once at startup.
    pub logo: Arc<LogoImage>,
    /// Page geometry and fonts of the generated CV.
    pub page_config: Arc<PageConfig>,
}
