#![allow(dead_code)]

use async_trait::async_trait;
use diagent_core::llm::{FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse};
use diagent_core::render::{DiagramRenderer, RenderError, RenderFailure, RenderedDiagram};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const SEQUENCE_REPLY: &str = "Here is your diagram:\n```plantuml\n@startuml\n!theme aws-orange\ntitle Messaging\nAlice -> Bob: Message\n@enduml\n```\nLet me know if you need changes.";

/// Replays canned replies in order and records every request
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<Result<Option<String>, LLMError>>>>,
    requests: Arc<Mutex<Vec<LLMRequest>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(Some(text.to_string())))
    }

    pub fn empty_reply(self) -> Self {
        self.push(Ok(None))
    }

    pub fn fail(self, error: LLMError) -> Self {
        self.push(Err(error))
    }

    fn push(self, reply: Result<Option<String>, LLMError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn user_messages(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.messages[0].content.clone())
            .collect()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LLMError::Provider("script exhausted".to_string())))?;
        Ok(LLMResponse {
            content: reply,
            usage: None,
            finish_reason: FinishReason::Stop,
        })
    }

    fn supported_models(&self) -> Vec<String> {
        vec!["scripted-model".to_string()]
    }

    fn validate_request(&self, _request: &LLMRequest) -> Result<(), LLMError> {
        Ok(())
    }
}

/// Fails a fixed number of times, then "renders" to fixed paths
#[derive(Clone)]
pub struct FakeRenderer {
    dir: PathBuf,
    failures_left: Arc<Mutex<usize>>,
    error: RenderError,
    rendered: Arc<Mutex<Vec<String>>>,
}

impl FakeRenderer {
    pub fn succeeding(dir: impl Into<PathBuf>) -> Self {
        Self::failing_first(dir, 0)
    }

    pub fn failing_first(dir: impl Into<PathBuf>, failures: usize) -> Self {
        Self {
            dir: dir.into(),
            failures_left: Arc::new(Mutex::new(failures)),
            error: RenderError::NonZeroExit {
                code: Some(1),
                stderr: "Syntax Error? (Assumed diagram type: sequence)".to_string(),
            },
            rendered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always_failing(dir: impl Into<PathBuf>) -> Self {
        Self::failing_first(dir, usize::MAX)
    }

    /// Behaves like a renderer whose program is not installed
    pub fn missing_program(dir: impl Into<PathBuf>) -> Self {
        Self {
            error: RenderError::Spawn {
                program: "java".to_string(),
                message: "No such file or directory (os error 2)".to_string(),
            },
            ..Self::always_failing(dir)
        }
    }

    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }

    pub fn image_path(&self) -> PathBuf {
        self.dir.join("output.png")
    }
}

#[async_trait]
impl DiagramRenderer for FakeRenderer {
    async fn render(&self, markup: &str) -> Result<RenderedDiagram, RenderFailure> {
        self.rendered.lock().unwrap().push(markup.to_string());
        {
            let mut left = self.failures_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err(RenderFailure {
                    attempts: 3,
                    last: self.error.clone(),
                });
            }
        }
        Ok(RenderedDiagram {
            markup_path: self.dir.join("output.puml"),
            image_path: self.image_path(),
            attempts: 1,
        })
    }
}
