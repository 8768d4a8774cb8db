//! Application setup and initialization
//!
//! Reads validated configuration, connects the metadata and object stores, assembles the
//! ingest pipeline and returns the router ready to serve.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use crate::telemetry;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
use tubely_processing::{
    FastStartRewriter, FfmpegFastStart, FfprobeProber, IngestConfig, IngestPipeline, MediaProber,
};
use tubely_storage::{create_storage, IdGenerator, RandomHexIdGenerator, Storage};

/// Collaborators the pipeline and handlers are built from.
pub struct Components {
    pub repository: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub prober: Arc<dyn MediaProber>,
    pub rewriter: Arc<dyn FastStartRewriter>,
    pub ids: Arc<dyn IdGenerator>,
}

/// Initialize the complete application
///
/// Returns the application state and configured router
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    config.validate()?;
    telemetry::init_telemetry(config.uses_json_logs());

    tracing::info!(
        environment = %config.environment,
        storage_backend = %config.storage_backend,
        "Starting Tubely API"
    );

    let repository: Arc<dyn VideoRepository> = match config.database_url {
        Some(ref url) => {
            let pool = database::setup_database(url, config.db_max_connections).await?;
            Arc::new(PgVideoRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory video store");
            Arc::new(InMemoryVideoRepository::new())
        }
    };

    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = %storage.backend_type(), "Storage initialized");

    let components = Components {
        repository,
        storage,
        prober: Arc::new(FfprobeProber::new(
            config.ffprobe_path.clone(),
            config.media_tool_timeout,
        )),
        rewriter: Arc::new(FfmpegFastStart::new(
            config.ffmpeg_path.clone(),
            config.media_tool_timeout,
        )),
        ids: Arc::new(RandomHexIdGenerator),
    };

    build_app(config, components)
}

/// Assemble state and routes from already constructed components.
pub fn build_app(config: Config, components: Components) -> Result<(Arc<AppState>, Router)> {
    let pipeline = IngestPipeline::new(
        components.repository.clone(),
        components.prober,
        components.rewriter,
        components.storage.clone(),
        components.ids.clone(),
        IngestConfig {
            staging_dir: config.staging_dir.clone(),
            max_upload_bytes: config.max_video_size_bytes,
        },
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        repository: components.repository,
        storage: components.storage,
        pipeline: Arc::new(pipeline),
        ids: components.ids,
    });

    let router = routes::setup_routes(&config, state.clone())?;
    Ok((state, router))
}
