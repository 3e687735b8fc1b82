use crate::api::ListingSource;
use crate::config::ViewConfig;
use crate::views::ViewRegistry;
use std::sync::Arc;

/// Everything a request handler needs, shared by all server workers.
pub struct AppState {
    pub views: ViewRegistry,
    pub view_cfg: ViewConfig,
}

impl AppState {
    pub fn new(source: Arc<dyn ListingSource>, view_cfg: ViewConfig) -> Self {
        Self {
            views: ViewRegistry::new(source, view_cfg.capacity),
            view_cfg,
        }
    }
}
