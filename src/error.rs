use thiserror::Error;

/// Configuration rejected before any pixel is touched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("downscale factor must be in (0, 1], got {0}")]
    InvalidDownscaleFactor(f64),

    #[error("downscaling {width}x{height} by {factor} leaves an empty image")]
    EmptyDownscale { width: u32, height: u32, factor: f64 },

    #[error("block size must be at least 1, got {0}")]
    InvalidBlockSize(u32),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("output of {width}x{height} blocks of size {block_size} does not fit in u32 dimensions")]
    OutputTooLarge {
        width: u32,
        height: u32,
        block_size: u32,
    },

    #[error("invalid palette color `{0}`, expected r,g,b with values in 0..=255")]
    InvalidColor(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PixelizeError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("no source image supplied")]
    MissingInput,
}
