use thiserror::Error;

/// Result type alias for stylematch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pixel grid handed to the extractor is structurally unusable. This is the only extraction failure that
    /// reaches the caller; every other problem is recovered internally.
    #[error("invalid image: {0}")]
    InvalidImage(#[from] InvalidImage),

    #[error("invalid hex color {0:?}, expected six hex digits")]
    InvalidHex(String),

    #[error("invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: &'static str, value: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidImage {
    #[error("image dimensions cannot be zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("expected 3 channels per pixel, got {0}")]
    ChannelCount(usize),

    #[error("pixel buffer length {len} does not match the expected {expected}")]
    BufferLength { len: usize, expected: usize },
}

impl Error {
    pub(crate) fn parameter(parameter: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter,
            value: value.to_string(),
        }
    }
}
