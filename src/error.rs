use thiserror::Error;

/// Errors raised while building a pixel grid or configuring palette generation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("pixel buffer of {len} bytes does not match a {width}x{height} RGBA grid")]
    InvalidGrid { width: u32, height: u32, len: usize },

    #[error("the color count must be at least 1")]
    InvalidColorCount,

    #[error("the iteration cap must be at least 1")]
    InvalidIterationCap,

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Errors raised while resolving an image source into a pixel grid.
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("no image source supplied: set either a URL or a decoded image")]
    SourceMissing,

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to decode image from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("failed to load image from {url}: {reason}")]
    LoadFailure { url: String, reason: String },
}
