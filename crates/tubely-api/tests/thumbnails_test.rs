//! Thumbnail upload integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnails_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{api_path, bearer, setup_test_app, ASSETS_BASE_URL, MAX_THUMBNAIL_BYTES};
use tubely_core::VideoResponse;
use uuid::Uuid;

const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

fn thumbnail_form(bytes: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes).file_name(file_name).mime_type(mime_type);
    MultipartForm::new().add_part("thumbnail", part)
}

#[tokio::test]
async fn test_upload_thumbnail_is_referenced_from_record() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnails/{}", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(thumbnail_form(FAKE_PNG.to_vec(), "cover.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: VideoResponse = response.json();
    let key = format!("thumbnails/{:064x}.png", 1);
    let expected_url = format!("{}/{}", ASSETS_BASE_URL, key);
    assert_eq!(body.thumbnail_url.as_deref(), Some(expected_url.as_str()));
    assert!(body.video_url.is_none());

    let stored = std::fs::read(app.storage_dir.path().join(&key)).expect("thumbnail should exist");
    assert_eq!(stored, FAKE_PNG);
    assert_eq!(
        app.reload(video.id).await.thumbnail_url.as_deref(),
        Some(expected_url.as_str())
    );
}

#[tokio::test]
async fn test_jpeg_thumbnail_gets_jpg_extension() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnails/{}", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(thumbnail_form(b"\xff\xd8\xff\xe0jfif".to_vec(), "cover", "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: VideoResponse = response.json();
    let url = body.thumbnail_url.expect("thumbnail_url should be set");
    assert!(url.ends_with(".jpg"), "{}", url);
}

#[tokio::test]
async fn test_thumbnail_rejects_non_image() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnails/{}", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(thumbnail_form(b"GIF89a".to_vec(), "cover.gif", "image/gif"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.published_files(), 0);
    assert_eq!(app.reload(video.id).await, video);
}

#[tokio::test]
async fn test_thumbnail_over_limit_is_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let oversized = vec![0u8; (MAX_THUMBNAIL_BYTES + 1) as usize];
    let response = app
        .client()
        .post(&api_path(&format!("/thumbnails/{}", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(thumbnail_form(oversized, "cover.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(app.published_files(), 0);
    assert_eq!(app.reload(video.id).await, video);
}

#[tokio::test]
async fn test_thumbnail_requires_owner() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnails/{}", video.id)))
        .add_header("Authorization", bearer(Uuid::new_v4()))
        .multipart(thumbnail_form(FAKE_PNG.to_vec(), "cover.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(app.published_files(), 0);
}

#[tokio::test]
async fn test_video_ingest_keeps_existing_thumbnail() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let thumbnail = app
        .client()
        .post(&api_path(&format!("/thumbnails/{}", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(thumbnail_form(FAKE_PNG.to_vec(), "cover.png", "image/png"))
        .await;
    assert_eq!(thumbnail.status_code(), 200);

    let part = Part::bytes(b"\x00\x00\x00\x18ftypmp42mdat".to_vec())
        .file_name("boots.mp4")
        .mime_type("video/mp4");
    let upload = app
        .client()
        .post(&api_path(&format!("/videos/{}", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(MultipartForm::new().add_part("video", part))
        .await;
    assert_eq!(upload.status_code(), 200);

    let body: VideoResponse = upload.json();
    let thumbnail_url = format!("{}/thumbnails/{:064x}.png", ASSETS_BASE_URL, 1);
    let video_url = format!("{}/landscape/{:064x}.mp4", ASSETS_BASE_URL, 2);
    assert_eq!(body.thumbnail_url.as_deref(), Some(thumbnail_url.as_str()));
    assert_eq!(body.video_url.as_deref(), Some(video_url.as_str()));

    let stored = app.reload(video.id).await;
    assert_eq!(stored.thumbnail_url.as_deref(), Some(thumbnail_url.as_str()));
    assert_eq!(stored.video_url.as_deref(), Some(video_url.as_str()));
}
