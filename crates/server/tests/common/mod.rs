//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `repostly-server`
//! integration tests.
//!
//! - `TestApp`: spawns a real server on a random port with a mock generation
//!   provider, a mock OCR engine and an `httpmock::MockServer` standing in for
//!   the video platform.
//! - Helpers for building request payloads and page fixtures.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use httpmock::MockServer;
use repostly::{providers::ai::AiProvider, GenerationSettings};
use repostly_server::{
    config::AppConfig,
    router,
    state::{build_app_state_with, AppState},
};
use repostly_test_utils::{MockAiProvider, MockOcrEngine};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};

pub const PRIMARY_MODEL: &str = "primary-model";
pub const FALLBACK_MODEL: &str = "fallback-model";

/// The path served by the mock platform. It carries the platform domain so
/// the fetcher's domain check accepts the mock server's URL.
pub const VIDEO_PATH: &str = "/tiktok.com/@x/video/1";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub ai: MockAiProvider,
    pub ocr: Arc<MockOcrEngine>,
    pub app_state: AppState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// Builder for a `TestApp`.
pub struct TestAppBuilder {
    ai: Option<MockAiProvider>,
    ocr: MockOcrEngine,
}

impl TestAppBuilder {
    /// Uses `ai` as the generation provider.
    pub fn with_ai(mut self, ai: MockAiProvider) -> Self {
        self.ai = Some(ai);
        self
    }

    /// Runs without a generation provider, as when no credential is configured.
    pub fn without_ai(mut self) -> Self {
        self.ai = None;
        self
    }

    pub fn with_ocr(mut self, ocr: MockOcrEngine) -> Self {
        self.ocr = ocr;
        self
    }

    pub async fn spawn(self) -> Result<TestApp> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .with_test_writer()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let config = AppConfig {
            port: 0,
            generation: GenerationSettings {
                model: PRIMARY_MODEL.to_string(),
                fallback_model: FALLBACK_MODEL.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let ai = self.ai.clone().unwrap_or_default();
        let provider = self.ai.map(|ai| Box::new(ai) as Box<dyn AiProvider>);
        let ocr = Arc::new(self.ocr);
        let app_state = build_app_state_with(config, provider, ocr.clone())?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let app = router::create_router(app_state.clone());
        let server_handle = tokio::spawn(async move {
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(TestApp {
            address,
            client: Client::new(),
            mock_server,
            ai,
            ocr,
            app_state,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl TestApp {
    /// A harness with a mock generation provider and an OCR engine that
    /// recognizes a typical repost screenshot.
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            ai: Some(MockAiProvider::new()),
            ocr: MockOcrEngine::recognizing(SCREENSHOT_TEXT, 88.0),
        }
    }

    /// The mock platform URL of the test video.
    pub fn video_url(&self) -> String {
        self.mock_server.url(VIDEO_PATH)
    }

    /// Posts `body` to `/analyze` and returns the status and JSON body.
    pub async fn analyze(&self, body: serde_json::Value) -> Result<(u16, serde_json::Value)> {
        let response = self
            .client
            .post(format!("{}/analyze", self.address))
            .json(&body)
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok((status, response.json().await?))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// --- Fixtures ---

pub const SCREENSHOT_TEXT: &str = "Feeling grateful today\n#blessed #mood\noriginal sound - sunny";

/// A base64 payload that sniffs as a PNG.
pub fn png_base64() -> String {
    STANDARD.encode(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR fake screenshot bytes")
}

/// A video page carrying the caption in the embedded JSON state.
pub fn video_page(desc: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>TikTok</title></head><body>
<script id="SIGI_STATE" type="application/json">{{"ItemModule":{{"1":{{"desc":"{desc}","music":{{"title":"original sound - sunny"}}}}}}}}</script>
</body></html>"#
    )
}

/// A page with none of the recognized patterns.
pub fn empty_page() -> String {
    "<!DOCTYPE html><html><head><title>TikTok</title></head><body><div>Nothing to see</div></body></html>"
        .to_string()
}

/// The three section markers every analysis composed locally carries.
pub const SECTION_MARKERS: [&str; 3] = [
    "• Emotional tone:",
    "• Psychological reasoning:",
    "• Current mindset:",
];
