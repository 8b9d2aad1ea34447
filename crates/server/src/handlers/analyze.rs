//! # Analysis Handler
//!
//! The request orchestrator. A request is resolved to one input, turned into a
//! [`StructuredContent`] record by the link or the screenshot path, and handed
//! to the insight generator. Generation never fails, so once a record exists
//! the request succeeds.

use super::{AppError, AppState};
use crate::types::{AnalyzeInput, AnalyzeRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use repostly::{types::CAPTION_NOT_FOUND, AnalysisResult, StructuredContent};
use repostly_html::HtmlExtractor;
use repostly_ocr::OcrError;
use repostly_text::parse_ocr_text;
use repostly_web::FetchError;
use tracing::{error, info, warn};

pub const MISSING_INPUT_MESSAGE: &str = "Please provide either a TikTok URL or a screenshot";
pub const INVALID_URL_MESSAGE: &str = "Please provide a valid TikTok URL";
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Could not extract data from TikTok URL. Please ensure the video is public and accessible.";
pub const UNREADABLE_IMAGE_MESSAGE: &str =
    "Unable to extract readable text from the image. Please ensure the screenshot is clear and contains visible text.";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str =
    "The screenshot is too large. Please upload a smaller image.";

/// The handler for the `/analyze` endpoint.
pub async fn analyze_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::Validation(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
        } else {
            AppError::Internal(anyhow::anyhow!("Unreadable request body: {rejection}"))
        }
    })?;

    let content = match request
        .input()
        .ok_or_else(|| AppError::Validation(MISSING_INPUT_MESSAGE.to_string()))?
    {
        AnalyzeInput::Link(url) => content_from_link(&app_state, url).await?,
        AnalyzeInput::Screenshot(image) => content_from_screenshot(&app_state, image).await?,
    };

    info!(
        caption = %content.caption,
        hashtags = content.hashtags.len(),
        audio = %content.audio,
        "Extracted content"
    );

    let insight = app_state.insight.generate(&content).await;
    info!(source = ?insight.source, "Analysis ready");

    Ok(Json(AnalysisResult::success(insight.text)))
}

/// Fetches the video page and runs the pattern extractor over it.
async fn content_from_link(
    app_state: &AppState,
    url: &str,
) -> Result<StructuredContent, AppError> {
    info!("Analyzing link: {url}");
    let html = app_state.fetcher.fetch_page(url).await.map_err(|e| {
        if e.is_validation() {
            AppError::Validation(INVALID_URL_MESSAGE.to_string())
        } else {
            log_fetch_failure(&e);
            AppError::Upstream(EXTRACTION_FAILED_MESSAGE.to_string())
        }
    })?;

    let draft = HtmlExtractor::shared().extract_draft(&html);
    if draft.is_empty() {
        return Err(AppError::Validation(EXTRACTION_FAILED_MESSAGE.to_string()));
    }
    Ok(draft.finalize(CAPTION_NOT_FOUND))
}

/// Recognizes the screenshot and runs the OCR text parser over the result.
async fn content_from_screenshot(
    app_state: &AppState,
    image: &str,
) -> Result<StructuredContent, AppError> {
    info!("Analyzing screenshot ({} base64 chars)", image.len());
    let recognition = app_state
        .recognizer
        .recognize_base64(image)
        .await
        .map_err(|e| {
            log_ocr_failure(&e);
            AppError::Upstream(e.user_message().to_string())
        })?;

    let min_chars = app_state.recognizer.options().min_text_chars;
    if recognition.text.chars().count() < min_chars {
        return Err(AppError::Validation(UNREADABLE_IMAGE_MESSAGE.to_string()));
    }
    Ok(parse_ocr_text(&recognition.text))
}

fn log_fetch_failure(err: &FetchError) {
    if err.is_timeout() {
        warn!("Page fetch timed out: {err}");
    } else {
        warn!("Page fetch failed: {err}");
    }
}

fn log_ocr_failure(err: &OcrError) {
    match err {
        OcrError::EngineUnavailable { .. } | OcrError::Io(_) => {
            error!("OCR engine failure: {err}")
        }
        _ => warn!("OCR failed: {err}"),
    }
}
