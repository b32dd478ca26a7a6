//! Test utilities for Crammer flow tests.

#![allow(dead_code)]

use async_trait::async_trait;
use crammer_client::CrammerDriver;
use crammer_core::{GenerateRequest, GenerateResponse, Output, ToolCall};
use crammer_error::{GenerationError, GenerationErrorKind};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Install a fmt subscriber once so flow traces show up under
/// `RUST_LOG` when debugging tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mock driver replaying a fixed script of responses.
pub struct ScriptedDriver {
    script: Mutex<VecDeque<Result<GenerateResponse, GenerationError>>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedDriver {
    pub fn new(script: Vec<Result<GenerateResponse, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CrammerDriver for ScriptedDriver {
    async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GenerationError::new(GenerationErrorKind::Api {
                status: 500,
                message: "scripted driver exhausted".to_string(),
            }))
        })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

pub fn ok_structured(value: Value) -> Result<GenerateResponse, GenerationError> {
    Ok(GenerateResponse {
        outputs: vec![Output::Structured(value)],
    })
}

pub fn ok_audio(data: Vec<u8>) -> Result<GenerateResponse, GenerationError> {
    Ok(GenerateResponse {
        outputs: vec![Output::Audio {
            mime: Some("audio/L16;codec=pcm;rate=24000".to_string()),
            data,
        }],
    })
}

pub fn ok_tool_call(name: &str, arguments: Value) -> Result<GenerateResponse, GenerationError> {
    Ok(GenerateResponse {
        outputs: vec![Output::ToolCalls(vec![ToolCall {
            id: None,
            name: name.to_string(),
            arguments,
        }])],
    })
}

pub fn rate_limited() -> Result<GenerateResponse, GenerationError> {
    Err(GenerationError::new(GenerationErrorKind::RateLimited {
        message: "quota exceeded".to_string(),
    }))
}

pub fn unavailable() -> Result<GenerateResponse, GenerationError> {
    Err(GenerationError::new(GenerationErrorKind::Unavailable {
        message: "model overloaded".to_string(),
    }))
}

pub fn api_error(status: u16) -> Result<GenerateResponse, GenerationError> {
    Err(GenerationError::new(GenerationErrorKind::Api {
        status,
        message: "backend rejected the request".to_string(),
    }))
}
