use async_trait::async_trait;
use repostly::errors::PromptError;
use repostly::providers::ai::{AiProvider, GenerationRequest};
use repostly_ocr::{OcrEngine, OcrError, OcrWorker, Recognition};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// How the mock answers for a given model.
#[derive(Clone, Debug)]
pub enum MockReply {
    Text(String),
    ModelUnavailable,
    ApiError(u16),
}

/// A recorded generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs the reply for a model. Unprogrammed models answer with a 500.
    pub fn add_reply(&self, model: &str, reply: MockReply) {
        let mut replies = self.replies.lock().unwrap();
        replies.insert(model.to_string(), reply);
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, PromptError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: request.model.to_string(),
            system_prompt: request.system_prompt.to_string(),
            user_prompt: request.user_prompt.to_string(),
        });

        let reply = self.replies.lock().unwrap().get(request.model).cloned();
        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::ModelUnavailable) => {
                Err(PromptError::ModelUnavailable(request.model.to_string()))
            }
            Some(MockReply::ApiError(status)) => Err(PromptError::AiApi {
                status,
                message: "mock failure".to_string(),
            }),
            None => Err(PromptError::AiApi {
                status: 500,
                message: format!("no reply programmed for model '{}'", request.model),
            }),
        }
    }
}

// --- Mock OCR Engine ---

/// An OCR engine that returns a fixed recognition and counts worker lifecycles.
#[derive(Clone, Debug)]
pub struct MockOcrEngine {
    reply: Option<Recognition>,
    created: Arc<AtomicUsize>,
    terminated: Arc<AtomicUsize>,
}

impl MockOcrEngine {
    /// Every worker recognizes `text` with `confidence`.
    pub fn recognizing(text: &str, confidence: f32) -> Self {
        Self {
            reply: Some(Recognition {
                text: text.to_string(),
                confidence,
            }),
            created: Arc::default(),
            terminated: Arc::default(),
        }
    }

    /// Every worker fails to recognize anything.
    pub fn failing() -> Self {
        Self {
            reply: None,
            created: Arc::default(),
            terminated: Arc::default(),
        }
    }

    pub fn workers_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn workers_terminated(&self) -> usize {
        self.terminated.load(Ordering::SeqCst)
    }
}

struct MockOcrWorker {
    reply: Option<Recognition>,
    terminated: Arc<AtomicUsize>,
}

#[async_trait]
impl OcrEngine for MockOcrEngine {
    async fn create_worker(&self, _language: &str) -> Result<Box<dyn OcrWorker>, OcrError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockOcrWorker {
            reply: self.reply.clone(),
            terminated: self.terminated.clone(),
        }))
    }
}

#[async_trait]
impl OcrWorker for MockOcrWorker {
    async fn recognize(&mut self, _image: &[u8]) -> Result<Recognition, OcrError> {
        self.reply
            .clone()
            .ok_or_else(|| OcrError::Recognition("mock engine failure".to_string()))
    }

    fn terminate(self: Box<Self>) -> Result<(), OcrError> {
        self.terminated.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
