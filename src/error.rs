use thiserror::Error;

/// Errors raised while constructing a shape from user input.
///
/// The editor absorbs these: a rejected shape is simply not added.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("Shape dimensions too small (min: {min}). Width: {width}, Height: {height}")]
    TooSmall { min: f32, width: f32, height: f32 },

    #[error("Degenerate geometry: {0}")]
    Degenerate(&'static str),
}

/// Errors that can occur while loading a bitmap into a picture shape
#[derive(Error, Debug)]
pub enum PictureError {
    #[error("Failed to decode bitmap: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Bitmap has no pixels")]
    EmptyBitmap,
}

/// Errors that can occur while reading a canvas configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
