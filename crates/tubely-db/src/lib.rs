//! Tubely metadata store
//!
//! Video ownership records live behind the [`VideoRepository`] trait. Postgres is the
//! durable implementation; the in-memory one backs tests and single-node development.

pub mod db;

pub use db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
