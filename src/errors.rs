// SPDX-License-Identifier: MPL-2.0

//! Error types for the photo booth
//!
//! Every failure here is recoverable: the booth either retries, drops the
//! offending item, or degrades to a reduced-functionality state.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Video source errors
    Source(SourceError),
    /// Upload decode errors
    Decode(DecodeError),
    /// Pixel filter errors
    Filter(FilterError),
    /// Strip composition errors
    Composition(CompositionError),
    /// Session state machine errors
    Session(SessionError),
    /// Export (encode, save, share) errors
    Export(ExportError),
    /// Configuration errors
    Config(String),
    /// A background task panicked or was cancelled
    Task(String),
}

/// Video source errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No camera devices found
    NoSourceFound,
    /// The user or the platform refused camera access
    PermissionDenied(String),
    /// The source has no frame yet (zero dimensions)
    NotReady,
    /// A newer acquisition request replaced this one
    Superseded,
    /// A countdown or capture is already running
    Busy,
    /// Camera index outside the enumerated device list
    InvalidIndex(usize),
    /// Camera selection is disabled for this booth
    SelectionDisabled,
    /// Backend error
    Backend(String),
}

/// Upload decode errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Neither extension nor MIME type names an image
    UnsupportedFormat(String),
    /// HEIC/HEIF conversion failed or is unavailable
    HeifConversion(String),
    /// The bytes could not be decoded
    Corrupt(String),
}

/// Pixel filter errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Buffer length does not match width * height * 4
    InvalidBuffer { expected: usize, actual: usize },
    /// Width or height is zero
    InvalidDimensions { width: u32, height: u32 },
    /// A spatial pass cannot run on an image this small
    UnsupportedDimensions { width: u32, height: u32 },
}

/// Strip composition errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// Zero photos supplied
    NoPhotos,
    /// Rendering failed
    Render(String),
}

/// Session state machine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Transition not allowed from the current step
    InvalidTransition { from: String, action: &'static str },
    /// Session already holds `max` photos
    CapacityReached { max: usize },
    /// No photo with this id
    PhotoNotFound(String),
    /// The session reached export; photos are frozen
    SessionLocked,
    /// Not enough photos to leave the current step
    NotEnoughPhotos,
    /// Export requires a composed strip
    NoStrip,
}

/// Export errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Encoding failed
    EncodingFailed(String),
    /// Writing the file failed
    SaveFailed(String),
    /// The share target reported a failure
    ShareFailed(String),
}

impl AppError {
    /// Whether the user should be offered a retry action
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Source(
                SourceError::NoSourceFound
                    | SourceError::PermissionDenied(_)
                    | SourceError::NotReady
                    | SourceError::Backend(_)
            ) | AppError::Export(ExportError::SaveFailed(_) | ExportError::ShareFailed(_))
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Source(e) => write!(f, "Source error: {}", e),
            AppError::Decode(e) => write!(f, "Decode error: {}", e),
            AppError::Filter(e) => write!(f, "Filter error: {}", e),
            AppError::Composition(e) => write!(f, "Composition error: {}", e),
            AppError::Session(e) => write!(f, "Session error: {}", e),
            AppError::Export(e) => write!(f, "Export error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Task(msg) => write!(f, "Task error: {}", msg),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NoSourceFound => write!(f, "No camera devices found"),
            SourceError::PermissionDenied(msg) => write!(f, "Camera access denied: {}", msg),
            SourceError::NotReady => write!(f, "Source not ready"),
            SourceError::Superseded => write!(f, "Acquisition superseded by a newer request"),
            SourceError::Busy => write!(f, "A capture is already in progress"),
            SourceError::InvalidIndex(index) => write!(f, "No camera at index {}", index),
            SourceError::SelectionDisabled => write!(f, "Camera selection is disabled"),
            SourceError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnsupportedFormat(name) => write!(f, "Unsupported file: {}", name),
            DecodeError::HeifConversion(msg) => write!(f, "HEIC conversion failed: {}", msg),
            DecodeError::Corrupt(msg) => write!(f, "Could not decode image: {}", msg),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidBuffer { expected, actual } => write!(
                f,
                "RGBA buffer size mismatch: expected {}, got {}",
                expected, actual
            ),
            FilterError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {}x{}", width, height)
            }
            FilterError::UnsupportedDimensions { width, height } => {
                write!(f, "Image too small for spatial pass: {}x{}", width, height)
            }
        }
    }
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositionError::NoPhotos => write!(f, "No photos to compose"),
            CompositionError::Render(msg) => write!(f, "Render failed: {}", msg),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidTransition { from, action } => {
                write!(f, "Cannot {} from {}", action, from)
            }
            SessionError::CapacityReached { max } => {
                write!(f, "Session already holds {} photos", max)
            }
            SessionError::PhotoNotFound(id) => write!(f, "Photo {} not found", id),
            SessionError::SessionLocked => write!(f, "Session is exported and locked"),
            SessionError::NotEnoughPhotos => write!(f, "Not enough photos"),
            SessionError::NoStrip => write!(f, "No strip has been composed"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            ExportError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
            ExportError::ShareFailed(msg) => write!(f, "Share failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for SourceError {}
impl std::error::Error for DecodeError {}
impl std::error::Error for FilterError {}
impl std::error::Error for CompositionError {}
impl std::error::Error for SessionError {}
impl std::error::Error for ExportError {}

// Conversions from sub-errors to AppError
impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err)
    }
}

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        AppError::Decode(err)
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        AppError::Filter(err)
    }
}

impl From<CompositionError> for AppError {
    fn from(err: CompositionError) -> Self {
        AppError::Composition(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::SaveFailed(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Export(err.into())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Task(err.to_string())
    }
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        DecodeError::Corrupt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_errors_are_retryable() {
        assert!(AppError::from(SourceError::PermissionDenied("denied".into())).is_retryable());
        assert!(AppError::from(SourceError::NotReady).is_retryable());
        assert!(!AppError::from(CompositionError::NoPhotos).is_retryable());
        assert!(!AppError::from(SessionError::SessionLocked).is_retryable());
    }

    #[test]
    fn test_display_includes_context() {
        let err = AppError::from(FilterError::InvalidBuffer {
            expected: 16,
            actual: 12,
        });
        assert_eq!(
            err.to_string(),
            "Filter error: RGBA buffer size mismatch: expected 16, got 12"
        );
    }
}
