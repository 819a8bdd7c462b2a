use thiserror::Error;

/// Errors that can occur while scanning recipe pages
///
/// The layout and text-parsing stages never fail; these cover the
/// surrounding I/O, image decoding, recognition and configuration.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Failed to decode or encode a page image
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// Failed to read an input file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Base64 image payload could not be decoded
    #[error("Invalid base64 image data: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// Fragment or line JSON could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The text recognizer reported a failure
    #[error("Recognition failed: {0}")]
    RecognitionError(String),

    /// A blocking enhancement task panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Caller passed something the pipeline cannot work with
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
