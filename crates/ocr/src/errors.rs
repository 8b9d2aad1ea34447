use std::path::PathBuf;
use thiserror::Error;

/// The message shown to users whenever recognition cannot run.
pub const OCR_FAILURE_MESSAGE: &str =
    "Failed to extract text from image. Please ensure the image is clear and contains readable text.";

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Image payload is malformed: {0}")]
    InvalidPayload(String),
    #[error("Image payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Image payload is empty")]
    EmptyImage,
    #[error("Payload is not a recognized image format")]
    UnsupportedImage,
    #[error("OCR engine '{path}' could not be started: {source}")]
    EngineUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("OCR worker I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR engine failed: {0}")]
    Recognition(String),
}

impl OcrError {
    /// The user-facing message. Details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        OCR_FAILURE_MESSAGE
    }
}
