//! # repostly-ocr: Screenshot Text Recognition
//!
//! Decodes a base64 screenshot and runs it through an [`OcrEngine`]. The
//! engine hands out single-use workers; [`ImageTextRecognizer`] always
//! terminates its worker, on success and on failure.

pub mod engine;
pub mod errors;
pub mod payload;
pub mod tesseract;

pub use engine::{OcrEngine, OcrWorker, Recognition};
pub use errors::{OcrError, OCR_FAILURE_MESSAGE};
pub use payload::{decode_image_payload, ImagePayload};
pub use tesseract::TesseractEngine;

use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Options for screenshot recognition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OcrOptions {
    /// Path or name of the Tesseract executable.
    pub tesseract_path: String,
    pub language: String,
    /// Recognitions below this confidence are logged as warnings.
    pub low_confidence_threshold: f32,
    /// Recognized text shorter than this is treated as unreadable.
    pub min_text_chars: usize,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            tesseract_path: "tesseract".to_string(),
            language: "eng".to_string(),
            low_confidence_threshold: 30.0,
            min_text_chars: 10,
        }
    }
}

/// Recognizes text in base64 screenshots.
#[derive(Debug, Clone)]
pub struct ImageTextRecognizer {
    engine: Arc<dyn OcrEngine>,
    options: OcrOptions,
}

impl ImageTextRecognizer {
    pub fn new(engine: Arc<dyn OcrEngine>, options: OcrOptions) -> Self {
        Self { engine, options }
    }

    /// A recognizer backed by the Tesseract executable named in `options`.
    pub fn tesseract(options: OcrOptions) -> Self {
        let engine = Arc::new(TesseractEngine::new(options.tesseract_path.clone()));
        Self::new(engine, options)
    }

    pub fn options(&self) -> &OcrOptions {
        &self.options
    }

    /// Decodes `payload` and recognizes its text. The returned text is trimmed.
    ///
    /// Low confidence is not an error; callers gate acceptance on text length.
    pub async fn recognize_base64(&self, payload: &str) -> Result<Recognition, OcrError> {
        let image = decode_image_payload(payload)?;
        debug!(
            bytes = image.bytes.len(),
            format = ?image.format,
            "Decoded screenshot payload"
        );

        let mut worker = self.engine.create_worker(&self.options.language).await?;
        let result = worker.recognize(&image.bytes).await;
        if let Err(e) = worker.terminate() {
            warn!("Failed to terminate OCR worker: {e}");
        }

        let recognition = result?;
        if recognition.confidence < self.options.low_confidence_threshold {
            warn!("Low OCR confidence: {:.1}%", recognition.confidence);
        }

        Ok(Recognition {
            text: recognition.text.trim().to_string(),
            confidence: recognition.confidence,
        })
    }
}
