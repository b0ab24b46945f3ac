//! Error types for the hand actuator library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// `ONNX` Runtime inference failed
    #[error("ONNX Runtime error: {0}")]
    OnnxRuntime(#[from] ort::OrtError),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Camera could not be opened; the capture loop does not start
    #[error("Camera device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A single frame could not be read from the camera
    #[error("Frame acquisition failed: {0}")]
    FrameAcquisitionFailed(String),

    /// Landmarks are present but cannot be classified
    #[error("Invalid gesture geometry: {0}")]
    InvalidGestureGeometry(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model loading or inference error
    #[error("Model error: {0}")]
    ModelError(String),

    /// Model output processing error
    #[error("Model output error: {0}")]
    ModelOutputError(String),

    /// Filter initialization or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Pointer device operation failed
    #[error("Cursor control error: {0}")]
    CursorControl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The capture worker panicked before it could be joined
    #[error("Capture worker terminated abnormally")]
    WorkerPanicked,
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
