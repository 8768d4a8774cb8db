use std::sync::Arc;

use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::IngestPipeline;
use tubely_storage::{IdGenerator, Storage};

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub pipeline: Arc<IngestPipeline>,
    pub ids: Arc<dyn IdGenerator>,
}
