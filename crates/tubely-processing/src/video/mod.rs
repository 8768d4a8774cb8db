//! Video inspection and container rewriting.

mod faststart;
mod orientation;
mod probe;

pub use faststart::{faststart_args, rewritten_path, FastStartRewriter, FfmpegFastStart};
pub use orientation::{classify, Orientation};
pub use probe::{parse_probe_output, probe_args, FfprobeProber, MediaProber, StreamGeometry};
