//! Error types for the save pipeline

use std::path::PathBuf;

/// Error type for path resolution and image writing
#[derive(thiserror::Error, Debug)]
pub enum SaverError {
    #[error(
        "resolved directory {} escapes the output root {}",
        .candidate.display(),
        .root.display()
    )]
    PathEscape { root: PathBuf, candidate: PathBuf },
    #[error("unsupported number of channels: {0}")]
    UnsupportedChannels(usize),
    #[error("pixel buffer length {actual} does not match {width}x{height}x{channels}")]
    ShapeMismatch {
        width: u32,
        height: u32,
        channels: usize,
        actual: usize,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, SaverError>;
