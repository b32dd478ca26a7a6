//! The retrying generation client.
//!
//! Every generation in the library funnels through [`Generator`]: one
//! retry loop, one classification of transient versus terminal
//! failures, one place where schema validation gates what callers see.
//! Call sites supply a [`RetryPolicy`] instead of hand-rolling their
//! own loops.

use crate::{CancelSignal, CrammerDriver, ToolSet};
use crammer_core::{
    GenerateRequest, GenerateResponse, Input, Message, Output, RetryPolicy, Role, ToolCall,
};
use crammer_error::{GenerationError, GenerationErrorKind, RetryableError};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Tool round-trips permitted within a single attempt. A backend stuck
/// requesting tools is not a transient condition, so exceeding this is
/// terminal rather than retried.
pub const MAX_TOOL_ROUNDS: usize = 8;

/// Raw media returned by an audio-modality generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    /// MIME type reported by the backend
    pub mime: Option<String>,
    /// Raw audio bytes, already base64-decoded
    pub data: Vec<u8>,
}

/// Retrying client over a [`CrammerDriver`].
///
/// Each instance is call-scoped state only: a driver handle and an
/// optional cancellation signal. Concurrent requests through clones of
/// the same driver are independent.
#[derive(Debug, Clone)]
pub struct Generator<D: CrammerDriver> {
    driver: D,
    cancel: CancelSignal,
}

impl<D: CrammerDriver> Generator<D> {
    /// Creates a generator with an unfired cancellation signal.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            cancel: CancelSignal::new(),
        }
    }

    /// Creates a generator wired to an external cancellation signal.
    pub fn with_cancel(driver: D, cancel: CancelSignal) -> Self {
        Self { driver, cancel }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// A handle that cancels this generator's in-flight work.
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Issue a structured generation request, retrying transient
    /// failures per the policy.
    ///
    /// The returned value is always conformant to the request's
    /// declared output schema; a non-conformant or absent payload is
    /// treated as empty output and retried on the same budget as rate
    /// limits.
    #[instrument(skip_all, fields(provider = self.driver.provider_name()))]
    pub async fn generate(
        &self,
        request: &GenerateRequest,
        policy: &RetryPolicy,
    ) -> Result<Value, GenerationError> {
        self.retry_loop(policy, async |attempt| {
            debug!(attempt, "Issuing generation request");
            let response = self.driver.generate(request).await?;
            structured_value(request, &response)
        })
        .await
    }

    /// Issue an audio-modality request, returning the raw media
    /// payload. Absent media is empty output and retried.
    #[instrument(skip_all, fields(provider = self.driver.provider_name()))]
    pub async fn generate_media(
        &self,
        request: &GenerateRequest,
        policy: &RetryPolicy,
    ) -> Result<AudioPayload, GenerationError> {
        self.retry_loop(policy, async |attempt| {
            debug!(attempt, "Issuing media generation request");
            let response = self.driver.generate(request).await?;
            media_payload(&response)
        })
        .await
    }

    /// Issue a structured request with registered tools.
    ///
    /// The backend may interleave tool invocations with its final
    /// output; each one is resolved against the set, argument-checked,
    /// executed, result-checked and fed back into the still-open
    /// generation. Tool failures are terminal; transient generation
    /// failures rerun the whole attempt, which may reissue tool calls,
    /// so handlers must be idempotent.
    #[instrument(skip_all, fields(provider = self.driver.provider_name()))]
    pub async fn generate_with_tools(
        &self,
        request: &GenerateRequest,
        tools: &ToolSet,
        policy: &RetryPolicy,
    ) -> Result<Value, GenerationError> {
        let mut base = request.clone();
        base.tools = tools.specs();
        self.retry_loop(policy, async |attempt| {
            debug!(attempt, "Issuing tool-augmented generation request");
            self.tool_attempt(&base, tools).await
        })
        .await
    }

    /// One tool-augmented attempt: converse until the backend produces
    /// a final structured result.
    async fn tool_attempt(
        &self,
        request: &GenerateRequest,
        tools: &ToolSet,
    ) -> Result<Value, GenerationError> {
        let mut working = request.clone();
        let mut rounds = 0usize;
        loop {
            let response = self.driver.generate(&working).await?;
            let calls = collect_tool_calls(&response);
            if calls.is_empty() {
                return structured_value(request, &response);
            }

            rounds += 1;
            if rounds > MAX_TOOL_ROUNDS {
                return Err(GenerationError::new(GenerationErrorKind::ToolRounds(rounds)));
            }
            debug!(round = rounds, calls = calls.len(), "Backend requested tools");

            for call in calls {
                let result = self.invoke_tool(tools, &call).await?;
                working
                    .messages
                    .push(Message::new(Role::Assistant, vec![Input::ToolCall(call.clone())]));
                working.messages.push(Message::new(Role::User, vec![Input::ToolResult {
                    name: call.name.clone(),
                    content: result,
                }]));
            }
        }
    }

    /// Resolve and execute a single tool call.
    async fn invoke_tool(
        &self,
        tools: &ToolSet,
        call: &ToolCall,
    ) -> Result<Value, GenerationError> {
        let declaration = tools.get(&call.name).ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::ToolResolution {
                tool: call.name.clone(),
                reason: "no tool registered under this name".to_string(),
            })
        })?;

        declaration
            .spec()
            .input_schema
            .validate(&call.arguments)
            .map_err(|violation| {
                GenerationError::new(GenerationErrorKind::ToolResolution {
                    tool: call.name.clone(),
                    reason: format!("arguments rejected: {violation}"),
                })
            })?;

        debug!(tool = %call.name, "Invoking tool handler");
        let result = declaration
            .handler()
            .call(call.arguments.clone())
            .await
            .map_err(|reason| {
                GenerationError::new(GenerationErrorKind::ToolResolution {
                    tool: call.name.clone(),
                    reason: format!("handler failed: {reason}"),
                })
            })?;

        declaration
            .spec()
            .output_schema
            .validate(&result)
            .map_err(|violation| {
                GenerationError::new(GenerationErrorKind::ToolResolution {
                    tool: call.name.clone(),
                    reason: format!("result rejected: {violation}"),
                })
            })?;

        Ok(result)
    }

    /// The one retry loop. Races every attempt and every backoff wait
    /// against the cancellation signal; waits `base_delay × n` before
    /// retry *n*; surfaces the final failure inside
    /// [`GenerationErrorKind::ExhaustedRetries`] once the budget is
    /// spent; propagates terminal failures after a single attempt.
    async fn retry_loop<T>(
        &self,
        policy: &RetryPolicy,
        mut attempt: impl AsyncFnMut(u32) -> Result<T, GenerationError>,
    ) -> Result<T, GenerationError> {
        let max_attempts = policy.max_attempts();
        let mut attempt_number = 0u32;
        loop {
            attempt_number += 1;
            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    Err(GenerationError::new(GenerationErrorKind::Cancelled))
                }
                result = attempt(attempt_number) => result,
            };

            let error = match outcome {
                Ok(value) => {
                    if attempt_number > 1 {
                        debug!(attempts = attempt_number, "Generation succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            if matches!(error.kind(), GenerationErrorKind::Cancelled) {
                return Err(error);
            }
            if !error.is_retryable() {
                warn!(%error, "Terminal generation failure");
                return Err(error);
            }
            if attempt_number >= max_attempts {
                warn!(attempts = attempt_number, %error, "Retry budget exhausted");
                return Err(GenerationError::new(GenerationErrorKind::ExhaustedRetries {
                    attempts: attempt_number,
                    cause: Box::new(error),
                }));
            }

            let delay = policy.delay_for(attempt_number);
            debug!(
                attempt = attempt_number,
                delay_ms = delay.as_millis() as u64,
                %error,
                "Transient failure; backing off"
            );
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return Err(GenerationError::new(GenerationErrorKind::Cancelled));
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

/// Extract a schema-conformant structured value from a response.
fn structured_value(
    request: &GenerateRequest,
    response: &GenerateResponse,
) -> Result<Value, GenerationError> {
    let value = extract_structured(response)?;
    if let Some(schema) = &request.output_schema
        && let Err(violation) = schema.validate(&value)
    {
        warn!(%violation, "Response failed schema validation");
        return Err(GenerationError::new(GenerationErrorKind::EmptyOutput {
            reason: violation.to_string(),
        }));
    }
    Ok(value)
}

/// Pull the structured payload out of a response's outputs.
fn extract_structured(response: &GenerateResponse) -> Result<Value, GenerationError> {
    for output in &response.outputs {
        match output {
            Output::Structured(value) => return Ok(value.clone()),
            Output::Text(text) => return parse_json_text(text),
            _ => {}
        }
    }
    Err(GenerationError::new(GenerationErrorKind::EmptyOutput {
        reason: "backend returned no structured output".to_string(),
    }))
}

/// Parse a text output as JSON, tolerating a markdown code fence.
fn parse_json_text(text: &str) -> Result<Value, GenerationError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.strip_suffix("```").unwrap_or(rest))
        .unwrap_or(trimmed)
        .trim();
    serde_json::from_str(unfenced).map_err(|e| {
        GenerationError::new(GenerationErrorKind::EmptyOutput {
            reason: format!("response was not valid JSON: {e}"),
        })
    })
}

/// Pull the media payload out of a response's outputs.
fn media_payload(response: &GenerateResponse) -> Result<AudioPayload, GenerationError> {
    for output in &response.outputs {
        if let Output::Audio { mime, data } = output {
            if data.is_empty() {
                break;
            }
            return Ok(AudioPayload {
                mime: mime.clone(),
                data: data.clone(),
            });
        }
    }
    Err(GenerationError::new(GenerationErrorKind::EmptyOutput {
        reason: "no media returned".to_string(),
    }))
}

/// Collect every tool call in a response.
fn collect_tool_calls(response: &GenerateResponse) -> Vec<ToolCall> {
    response
        .outputs
        .iter()
        .filter_map(|output| match output {
            Output::ToolCalls(calls) => Some(calls.clone()),
            _ => None,
        })
        .flatten()
        .collect()
}
