//! Error types for papertree library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for papertree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or converting documents.
///
/// Malformed heading candidates never surface here: the extraction
/// pipeline drops them and keeps going.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when checking or reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The PDF backend failed to deliver text blocks or images.
    #[error("PDF backend error: {0}")]
    Backend(String),

    /// A resource referenced by the document does not exist.
    #[error("Resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// A section numeral could not be parsed.
    #[error("Invalid section numeral: {0:?}")]
    InvalidNumeral(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error reading a serialized document.
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// The translation service failed.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Deserialize(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ResourceNotFound(PathBuf::from("images/image_0_0.png"));
        assert_eq!(err.to_string(), "Resource not found: images/image_0_0.png");

        let err = Error::InvalidNumeral("1.x".to_string());
        assert_eq!(err.to_string(), "Invalid section numeral: \"1.x\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Deserialize(_)));
    }
}
