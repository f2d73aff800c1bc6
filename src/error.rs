/// Error types shared across the pipeline
///
/// Decode failures never reach callers directly: the validator turns them into
/// an invalid verdict and the model turns them into a default result.
/// `EcgError` is what the orchestrator and the CLI surface.

use thiserror::Error;

/// Message used when an invalid verdict carries no message of its own
pub const DEFAULT_INVALID_MESSAGE: &str = "Invalid ECG image";

/// Failure to turn an image payload into a drawable raster
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload is not a decodable image (bad data URL, corrupt bytes)
    #[error("failed to load image: {0}")]
    Load(String),
    /// The image decoded but no pixel buffer could be produced from it
    #[error("no drawable raster: {0}")]
    Context(String),
}

/// Upload guard failures, worded the way the upload form shows them
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please upload an image file")]
    NotAnImage,
    #[error("Image size must be less than 5MB")]
    TooLarge { size: u64, limit: u64 },
    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level pipeline errors
#[derive(Debug, Error)]
pub enum EcgError {
    /// Validation rejected the image; the message is shown to the user as-is
    #[error("{0}")]
    InvalidEcg(String),
    #[error("Failed to analyze ECG image")]
    AnalysisFailed,
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = EcgError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ecg_displays_message_verbatim() {
        let err = EcgError::InvalidEcg("Failed to load image".to_string());
        assert_eq!(err.to_string(), "Failed to load image");
    }

    #[test]
    fn test_analysis_failed_message() {
        assert_eq!(EcgError::AnalysisFailed.to_string(), "Failed to analyze ECG image");
    }
}
