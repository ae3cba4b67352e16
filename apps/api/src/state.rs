use std::sync::Arc;

use crate::config::Config;
use crate::resume::PageConfig;
use crate::upstream::ProfileApi;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// External profile API. Default: `HttpProfileApi`; tests swap in a stub.
    pub profile_api: Arc<dyn ProfileApi>,
    /// Resume page geometry used by the layout and export endpoints.
    pub page_config: PageConfig,
}
