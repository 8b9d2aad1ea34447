use crate::errors::OcrError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Text recognized from one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub text: String,
    /// Mean word confidence, 0 to 100.
    pub confidence: f32,
}

/// Creates recognition workers.
#[async_trait]
pub trait OcrEngine: Send + Sync + Debug {
    /// Acquires a worker for `language` (a Tesseract language code such as "eng").
    async fn create_worker(&self, language: &str) -> Result<Box<dyn OcrWorker>, OcrError>;
}

/// A single-use recognition worker.
///
/// Callers must call [`OcrWorker::terminate`] once they are done, whether or
/// not recognition succeeded.
#[async_trait]
pub trait OcrWorker: Send {
    async fn recognize(&mut self, image: &[u8]) -> Result<Recognition, OcrError>;

    /// Releases the worker's resources.
    fn terminate(self: Box<Self>) -> Result<(), OcrError>;
}
