//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs with an in-memory video store, local storage in a temp dir and fake
//! media tools, so no external services are needed.

pub mod media;

use axum_test::TestServer;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tubely_api::auth::issue_token;
use tubely_api::constants::API_PREFIX;
use tubely_api::setup::{build_app, Components};
use tubely_api::state::AppState;
use tubely_core::{Config, StorageBackend, Video};
use tubely_db::InMemoryVideoRepository;
use tubely_storage::{LocalStorage, SequentialIdGenerator};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const ASSETS_BASE_URL: &str = "http://localhost:8091/assets";
pub const MAX_VIDEO_BYTES: u64 = 64 * 1024;
pub const MAX_THUMBNAIL_BYTES: u64 = 16 * 1024;

/// API path prefix for tests (e.g. `/api/videos/...`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

/// Test application: server, state, and owned temp dirs.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub staging_dir: TempDir,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Create a video record owned by `user_id`.
    pub async fn create_video(&self, user_id: Uuid) -> Video {
        self.state
            .repository
            .create_video(user_id, "Boots on the ground".to_string(), Some("Test upload".to_string()))
            .await
            .expect("Failed to create video")
    }

    pub async fn reload(&self, video_id: Uuid) -> Video {
        self.state
            .repository
            .get_video(video_id)
            .await
            .expect("Failed to load video")
            .expect("Video disappeared")
    }

    /// Files left behind in the staging directory.
    pub fn staged_files(&self) -> usize {
        count_files(self.staging_dir.path())
    }

    /// Objects written to local storage.
    pub fn published_files(&self) -> usize {
        count_files(self.storage_dir.path())
    }
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| {
                    let path = entry.path();
                    if path.is_dir() {
                        count_files(&path)
                    } else {
                        1
                    }
                })
                .sum()
        })
        .unwrap_or(0)
}

pub fn bearer(user_id: Uuid) -> String {
    let token = issue_token(user_id, TEST_JWT_SECRET, chrono::Duration::hours(1))
        .expect("Failed to issue token");
    format!("Bearer {}", token)
}

fn test_config(staging_dir: &Path, storage_dir: &Path) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        log_format: "pretty".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        database_url: None,
        db_max_connections: 1,
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some(storage_dir.display().to_string()),
        local_storage_base_url: Some(ASSETS_BASE_URL.to_string()),
        presigned_url_ttl: Duration::from_secs(1800),
        max_video_size_bytes: MAX_VIDEO_BYTES,
        max_thumbnail_size_bytes: MAX_THUMBNAIL_BYTES,
        staging_dir: staging_dir.to_path_buf(),
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        media_tool_timeout: Duration::from_secs(30),
    }
}

/// Setup a test app whose prober reports `width`x`height` for every upload.
pub async fn setup_test_app_with_geometry(width: u32, height: u32) -> TestApp {
    let staging_dir = TempDir::new().expect("Failed to create staging dir");
    let storage_dir = TempDir::new().expect("Failed to create storage dir");
    let config = test_config(staging_dir.path(), storage_dir.path());

    let storage = LocalStorage::new(storage_dir.path(), ASSETS_BASE_URL.to_string())
        .await
        .expect("Failed to create local storage");

    let components = Components {
        repository: Arc::new(InMemoryVideoRepository::new()),
        storage: Arc::new(storage),
        prober: Arc::new(media::FixedProber::new(width, height)),
        rewriter: Arc::new(media::CopyRewriter),
        ids: Arc::new(SequentialIdGenerator::new()),
    };

    let (state, app) = build_app(config, components).expect("Failed to build app");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        staging_dir,
        storage_dir,
    }
}

/// Setup a test app with a 1280x720 prober.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_geometry(1280, 720).await
}
