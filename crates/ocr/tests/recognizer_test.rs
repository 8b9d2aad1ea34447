//! # Image Text Recognizer Tests
//!
//! Covers worker lifecycle and confidence handling with a mock engine, and
//! the Tesseract CLI integration with stand-in executables from `fixtures/`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use repostly_ocr::{ImageTextRecognizer, OcrError, OcrOptions};
use repostly_test_utils::MockOcrEngine;
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt().with_test_writer().init();
    });
}

fn png_payload() -> String {
    STANDARD.encode(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR fake screenshot bytes")
}

#[tokio::test]
async fn test_low_confidence_still_returns_text() {
    // --- 1. Arrange ---
    setup_tracing();
    let engine = Arc::new(MockOcrEngine::recognizing(
        "  a caption long enough to keep  \n",
        20.0,
    ));
    let recognizer = ImageTextRecognizer::new(engine.clone(), OcrOptions::default());

    // --- 2. Act ---
    let recognition = recognizer.recognize_base64(&png_payload()).await.unwrap();

    // --- 3. Assert ---
    assert_eq!(recognition.text, "a caption long enough to keep");
    assert_eq!(recognition.confidence, 20.0);
    assert_eq!(engine.workers_terminated(), 1);
}

#[tokio::test]
async fn test_worker_is_terminated_on_failure() {
    // --- 1. Arrange ---
    setup_tracing();
    let engine = Arc::new(MockOcrEngine::failing());
    let recognizer = ImageTextRecognizer::new(engine.clone(), OcrOptions::default());

    // --- 2. Act ---
    let result = recognizer.recognize_base64(&png_payload()).await;

    // --- 3. Assert ---
    assert!(matches!(result, Err(OcrError::Recognition(_))));
    assert_eq!(engine.workers_created(), 1);
    assert_eq!(engine.workers_terminated(), 1);
}

#[tokio::test]
async fn test_bad_payload_never_acquires_a_worker() {
    // --- 1. Arrange ---
    setup_tracing();
    let engine = Arc::new(MockOcrEngine::failing());
    let recognizer = ImageTextRecognizer::new(engine.clone(), OcrOptions::default());

    // --- 2. Act ---
    let result = recognizer
        .recognize_base64(&STANDARD.encode("hello, this is not an image"))
        .await;

    // --- 3. Assert ---
    let err = result.unwrap_err();
    assert!(matches!(err, OcrError::UnsupportedImage));
    assert_eq!(
        err.user_message(),
        "Failed to extract text from image. Please ensure the image is clear and contains readable text."
    );
    assert_eq!(engine.workers_created(), 0);
}

// --- Tesseract CLI with stand-in executables ---

#[cfg(unix)]
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[cfg(unix)]
#[tokio::test]
async fn test_tesseract_cli_report_is_parsed() {
    // --- 1. Arrange ---
    setup_tracing();
    let recognizer = ImageTextRecognizer::tesseract(OcrOptions {
        tesseract_path: fixture("fake-tesseract.sh"),
        ..Default::default()
    });

    // --- 2. Act ---
    let recognition = recognizer
        .recognize_base64(&format!("data:image/png;base64,{}", png_payload()))
        .await
        .unwrap();

    // --- 3. Assert ---
    assert_eq!(
        recognition.text,
        "Feeling grateful today\n#blessed\noriginal sound"
    );
    let expected = (91.0 + 87.0 + 85.0 + 79.0 + 74.0 + 72.0) / 6.0;
    assert!((recognition.confidence - expected).abs() < 0.01);
}

#[cfg(unix)]
#[tokio::test]
async fn test_tesseract_cli_failure_is_reported() {
    // --- 1. Arrange ---
    setup_tracing();
    let recognizer = ImageTextRecognizer::tesseract(OcrOptions {
        tesseract_path: fixture("failing-tesseract.sh"),
        ..Default::default()
    });

    // --- 2. Act ---
    let result = recognizer.recognize_base64(&png_payload()).await;

    // --- 3. Assert ---
    assert!(matches!(result, Err(OcrError::Recognition(_))));
}

#[tokio::test]
async fn test_missing_tesseract_binary() {
    // --- 1. Arrange ---
    setup_tracing();
    let recognizer = ImageTextRecognizer::tesseract(OcrOptions {
        tesseract_path: "/nonexistent/bin/tesseract".to_string(),
        ..Default::default()
    });

    // --- 2. Act ---
    let result = recognizer.recognize_base64(&png_payload()).await;

    // --- 3. Assert ---
    assert!(matches!(result, Err(OcrError::EngineUnavailable { .. })));
}
