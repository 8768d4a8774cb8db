//! Data models shared by the API, the pipeline and the metadata store.

mod access;
mod video;

pub use access::{AccessDescriptor, ParseAccessDescriptorError};
pub use video::{Video, VideoResponse};
