//! Database repositories for the data access layer

mod memory;
mod video;

pub use memory::InMemoryVideoRepository;
pub use video::{PgVideoRepository, VideoRepository};
