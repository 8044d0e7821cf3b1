use std::sync::Arc;

use crate::services::download::ImageDownloader;
use crate::services::orchestrator::JobOrchestrator;
use crate::services::upload::ImageUploader;
use crate::store::JobStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobStore>,
    pub orchestrator: JobOrchestrator,
}

impl AppState {
    pub fn new(
        store: Arc<dyn JobStore>,
        downloader: Arc<dyn ImageDownloader>,
        uploader: Arc<dyn ImageUploader>,
    ) -> Self {
        let orchestrator = JobOrchestrator::new(store.clone(), downloader, uploader);
        Self {
            store,
            orchestrator,
        }
    }
}
