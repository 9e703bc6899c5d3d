//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::persistence::{Database, SqliteLinkRepository};
use crate::infrastructure::qr::CodeRenderer;

/// Link service wired to the production store and renderer.
pub type AppLinkService = LinkService<SqliteLinkRepository, CodeRenderer>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub database: Database,
    /// Fixed origin for generated redirect URLs; `None` derives it per request.
    pub public_base_url: Option<String>,
    pub behind_proxy: bool,
}

impl AppState {
    /// Builds state over an open database.
    pub fn new(database: Database, renderer: CodeRenderer) -> Self {
        let link_repository = Arc::new(SqliteLinkRepository::new(database.pool()));
        let link_service = Arc::new(LinkService::new(link_repository, Arc::new(renderer)));

        Self {
            link_service,
            database,
            public_base_url: None,
            behind_proxy: false,
        }
    }

    /// Sets how the request origin of generated redirect URLs is determined.
    pub fn with_origin(mut self, public_base_url: Option<String>, behind_proxy: bool) -> Self {
        self.public_base_url = public_base_url;
        self.behind_proxy = behind_proxy;
        self
    }
}
