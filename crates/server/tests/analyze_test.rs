//! # `/analyze` End-to-End Tests
//!
//! Each test spawns the full server with a mock generation provider, a mock
//! OCR engine and an `httpmock` server standing in for the video platform.

mod common;

use common::{
    empty_page, png_base64, video_page, TestApp, FALLBACK_MODEL, PRIMARY_MODEL, SECTION_MARKERS,
    VIDEO_PATH,
};
use httpmock::Method::GET;
use repostly_ocr::OCR_FAILURE_MESSAGE;
use repostly_server::{
    errors::INTERNAL_ERROR_MESSAGE,
    handlers::{
        EXTRACTION_FAILED_MESSAGE, INVALID_URL_MESSAGE, MISSING_INPUT_MESSAGE,
        UNREADABLE_IMAGE_MESSAGE,
    },
};
use repostly_test_utils::{MockAiProvider, MockOcrEngine, MockReply};
use serde_json::json;

fn assert_failure(status: u16, body: &serde_json::Value, expected_status: u16, message: &str) {
    assert_eq!(status, expected_status, "unexpected status, body: {body}");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], message);
    assert!(body.get("analysis").is_none());
}

#[tokio::test]
async fn test_link_analysis_uses_extracted_content() -> anyhow::Result<()> {
    // --- 1. Arrange ---
    let ai = MockAiProvider::new();
    ai.add_reply(PRIMARY_MODEL, MockReply::Text("• Calm and hopeful".to_string()));
    let app = TestApp::builder().with_ai(ai).spawn().await?;
    let page_mock = app
        .mock_server
        .mock_async(|when, then| {
            when.method(GET)
                .path(VIDEO_PATH)
                .header_exists("user-agent")
                .header_exists("accept-language");
            then.status(200)
                .header("content-type", "text/html")
                .body(video_page("Feeling grateful today #blessed #mood"));
        })
        .await;

    // --- 2. Act ---
    let (status, body) = app.analyze(json!({ "tiktokUrl": app.video_url() })).await?;

    // --- 3. Assert ---
    page_mock.assert_async().await;
    assert_eq!(status, 200, "body: {body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"], "• Calm and hopeful");
    assert!(body.get("error").is_none());

    let calls = app.ai.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, PRIMARY_MODEL);
    assert!(calls[0]
        .user_prompt
        .contains(r#"Caption: "Feeling grateful today #blessed #mood""#));
    assert!(calls[0].user_prompt.contains("Hashtags: #blessed, #mood"));
    assert!(calls[0]
        .user_prompt
        .contains(r#"Audio: "original sound - sunny""#));
    Ok(())
}

#[tokio::test]
async fn test_screenshot_with_low_confidence_still_succeeds() -> anyhow::Result<()> {
    // --- 1. Arrange ---
    let ai = MockAiProvider::new();
    ai.add_reply(PRIMARY_MODEL, MockReply::Text("• Reflective".to_string()));
    let app = TestApp::builder()
        .with_ai(ai)
        .with_ocr(MockOcrEngine::recognizing(
            "Feeling grateful today\n#blessed\noriginal sound",
            20.0,
        ))
        .spawn()
        .await?;

    // --- 2. Act ---
    let (status, body) = app
        .analyze(json!({
            "screenshotBase64": format!("data:image/png;base64,{}", png_base64())
        }))
        .await?;

    // --- 3. Assert ---
    assert_eq!(status, 200, "body: {body}");
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"], "• Reflective");
    assert_eq!(app.ocr.workers_created(), 1);
    assert_eq!(app.ocr.workers_terminated(), 1);

    let calls = app.ai.get_calls();
    assert!(calls[0]
        .user_prompt
        .contains(r#"Caption: "Feeling grateful today""#));
    assert!(calls[0].user_prompt.contains(r#"Audio: "original sound""#));
    Ok(())
}

#[tokio::test]
async fn test_missing_input_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::builder().spawn().await?;

    let (status, body) = app.analyze(json!({})).await?;
    assert_failure(status, &body, 400, MISSING_INPUT_MESSAGE);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("TikTok URL or a screenshot"));

    let (status, body) = app
        .analyze(json!({ "tiktokUrl": "", "screenshotBase64": "  " }))
        .await?;
    assert_failure(status, &body, 400, MISSING_INPUT_MESSAGE);
    assert!(app.ai.get_calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_both_inputs_are_rejected() -> anyhow::Result<()> {
    let app = TestApp::builder().spawn().await?;

    let (status, body) = app
        .analyze(json!({
            "tiktokUrl": app.video_url(),
            "screenshotBase64": png_base64(),
        }))
        .await?;

    assert_failure(status, &body, 400, MISSING_INPUT_MESSAGE);
    assert_eq!(app.ocr.workers_created(), 0);
    Ok(())
}

#[tokio::test]
async fn test_page_without_content_is_rejected() -> anyhow::Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::builder().spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(GET).path(VIDEO_PATH);
            then.status(200).body(empty_page());
        })
        .await;

    // --- 2. Act ---
    let (status, body) = app.analyze(json!({ "tiktokUrl": app.video_url() })).await?;

    // --- 3. Assert ---
    assert_failure(status, &body, 400, EXTRACTION_FAILED_MESSAGE);
    assert!(app.ai.get_calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_foreign_domain_is_rejected_without_fetching() -> anyhow::Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::builder().spawn().await?;
    let page_mock = app
        .mock_server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).body(video_page("should never be fetched"));
        })
        .await;

    // --- 2. Act ---
    let (status, body) = app
        .analyze(json!({ "tiktokUrl": app.mock_server.url("/@x/video/1") }))
        .await?;

    // --- 3. Assert ---
    assert_failure(status, &body, 400, INVALID_URL_MESSAGE);
    assert_eq!(page_mock.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_upstream_error_status_is_a_client_error() -> anyhow::Result<()> {
    // --- 1. Arrange ---
    let app = TestApp::builder().spawn().await?;
    app.mock_server
        .mock_async(|when, then| {
            when.method(GET).path(VIDEO_PATH);
            then.status(500).body("boom");
        })
        .await;

    // --- 2. Act ---
    let (status, body) = app.analyze(json!({ "tiktokUrl": app.video_url() })).await?;

    // --- 3. Assert ---
    assert_failure(status, &body, 400, EXTRACTION_FAILED_MESSAGE);
    Ok(())
}

#[tokio::test]
async fn test_short_ocr_text_is_unreadable() -> anyhow::Result<()> {
    let app = TestApp::builder()
        .with_ocr(MockOcrEngine::recognizing("  hi there \n", 95.0))
        .spawn()
        .await?;

    let (status, body) = app
        .analyze(json!({ "screenshotBase64": png_base64() }))
        .await?;

    assert_failure(status, &body, 400, UNREADABLE_IMAGE_MESSAGE);
    assert_eq!(app.ocr.workers_terminated(), 1);
    assert!(app.ai.get_calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_ocr_failure_is_reported_generically() -> anyhow::Result<()> {
    let app = TestApp::builder()
        .with_ocr(MockOcrEngine::failing())
        .spawn()
        .await?;

    let (status, body) = app
        .analyze(json!({ "screenshotBase64": png_base64() }))
        .await?;

    assert_failure(status, &body, 400, OCR_FAILURE_MESSAGE);
    assert_eq!(app.ocr.workers_created(), 1);
    assert_eq!(app.ocr.workers_terminated(), 1);
    Ok(())
}

#[tokio::test]
async fn test_non_image_payload_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::builder().spawn().await?;

    let (status, body) = app
        .analyze(json!({ "screenshotBase64": "not base64 at all!" }))
        .await?;

    assert_failure(status, &body, 400, OCR_FAILURE_MESSAGE);
    assert_eq!(app.ocr.workers_created(), 0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_an_internal_error() -> anyhow::Result<()> {
    let app = TestApp::builder().spawn().await?;

    let response = app
        .client
        .post(format!("{}/analyze", app.address))
        .header("content-type", "application/json")
        .body("{\"tiktokUrl\": ")
        .send()
        .await?;

    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().await?;
    assert_failure(status, &body, 500, INTERNAL_ERROR_MESSAGE);
    Ok(())
}

#[tokio::test]
async fn test_generation_failure_falls_back_to_local_synthesis() -> anyhow::Result<()> {
    // --- 1. Arrange ---
    let ai = MockAiProvider::new();
    ai.add_reply(PRIMARY_MODEL, MockReply::ApiError(429));
    let app = TestApp::builder().with_ai(ai).spawn().await?;

    // --- 2. Act ---
    let (status, body) = app
        .analyze(json!({ "screenshotBase64": png_base64() }))
        .await?;

    // --- 3. Assert ---
    assert_eq!(status, 200, "body: {body}");
    assert_eq!(body["success"], true);
    let analysis = body["analysis"].as_str().unwrap();
    for marker in SECTION_MARKERS {
        assert!(analysis.contains(marker), "missing '{marker}' in: {analysis}");
    }
    assert_eq!(app.ai.get_calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_unavailable_model_retries_with_reduced_prompt() -> anyhow::Result<()> {
    // --- 1. Arrange ---
    let ai = MockAiProvider::new();
    ai.add_reply(PRIMARY_MODEL, MockReply::ModelUnavailable);
    ai.add_reply(FALLBACK_MODEL, MockReply::Text("• Nostalgic".to_string()));
    let app = TestApp::builder().with_ai(ai).spawn().await?;

    // --- 2. Act ---
    let (status, body) = app
        .analyze(json!({ "screenshotBase64": png_base64() }))
        .await?;

    // --- 3. Assert ---
    assert_eq!(status, 200, "body: {body}");
    assert_eq!(body["analysis"], "• Nostalgic");
    let models: Vec<String> = app.ai.get_calls().into_iter().map(|c| c.model).collect();
    assert_eq!(models, vec![PRIMARY_MODEL, FALLBACK_MODEL]);
    Ok(())
}

#[tokio::test]
async fn test_without_generation_service_analysis_is_local() -> anyhow::Result<()> {
    let app = TestApp::builder().without_ai().spawn().await?;

    let (status, body) = app
        .analyze(json!({ "screenshotBase64": png_base64() }))
        .await?;

    assert_eq!(status, 200, "body: {body}");
    let analysis = body["analysis"].as_str().unwrap();
    for marker in SECTION_MARKERS {
        assert!(analysis.contains(marker));
    }
    assert!(app.ai.get_calls().is_empty());
    Ok(())
}
