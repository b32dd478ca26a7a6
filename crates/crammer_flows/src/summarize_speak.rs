//! Summarize-then-speak chained flow.
//!
//! Stage 1 condenses raw lesson content into a short narration script;
//! stage 2 synthesizes the script as WAV audio. Each stage retries
//! independently, and a failure in either abandons the whole chain —
//! the intermediate script is never handed to the caller.

use crate::speech::{SpeechAudio, SpeechInput, generate_speech};
use crate::support::decode;
use async_trait::async_trait;
use crammer_client::{Chain, CrammerDriver, Generator, Stage};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use tracing::{instrument, warn};

/// Upper bound on the content handed to the summarize stage. Longer
/// content is truncated on a character boundary rather than rejected,
/// since whole lesson pages are legitimate input.
pub const MAX_SUMMARY_INPUT_CHARS: usize = 20_000;

/// Input for the chained flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeAndSpeakInput {
    /// The full text content to be summarized and spoken
    pub content: String,
    /// The topic of the content, for context in the summary
    pub topic: String,
}

#[derive(Debug, Deserialize)]
struct PodcastScript {
    script: String,
}

fn script_schema() -> Schema {
    Schema::object([Field::required("script", Schema::non_empty_string())
        .describe("The generated podcast script.")])
}

fn summarize_prompt(topic: &str, content: &str) -> String {
    format!(
        r#"You are an expert communicator. Your task is to take the following raw lesson content about "{topic}" and turn it into a clear and concise podcast script. The script should flow naturally as spoken audio. Explain the core concepts and finish with a quick summary of the key takeaways. Be brief.

Raw Content:
```
{content}
```"#
    )
}

fn truncate_content(content: &str) -> String {
    if content.chars().count() <= MAX_SUMMARY_INPUT_CHARS {
        return content.to_string();
    }
    warn!(
        chars = content.chars().count(),
        limit = MAX_SUMMARY_INPUT_CHARS,
        "Content exceeds the summarize-stage bound; truncating"
    );
    content.chars().take(MAX_SUMMARY_INPUT_CHARS).collect()
}

/// Stage 1: lesson content + topic → narration script.
struct SummarizeStage<'a, D: CrammerDriver> {
    generator: &'a Generator<D>,
}

#[async_trait]
impl<'a, D: CrammerDriver> Stage for SummarizeStage<'a, D> {
    type Input = SummarizeAndSpeakInput;
    type Output = String;

    fn name(&self) -> &str {
        "summarize"
    }

    async fn run(&self, input: SummarizeAndSpeakInput) -> Result<String, GenerationError> {
        // Copy the stored handle out so the borrow held across the await
        // carries the struct's concrete lifetime `'a` rather than the
        // higher-ranked lifetime of `&self` that `#[async_trait]`
        // introduces — the solver cannot prove `Send` for the latter
        // when `D` is generic.
        let generator: &'a Generator<D> = self.generator;
        let content = truncate_content(&input.content);
        let request =
            GenerateRequest::prompt(summarize_prompt(&input.topic, &content), script_schema());
        // Run the generation inside a `Send` future that *owns* the
        // request and policy and captures only the fixed-lifetime
        // `&'a Generator<D>`. This keeps `Send` provable at the concrete
        // `'a`; calling `generate` directly would leave the future
        // borrowing under the higher-ranked lifetime `#[async_trait]`
        // introduces for `&self`, which the solver cannot discharge for
        // a generic `D` (rustc "implementation of Send is not general
        // enough").
        let generate: Pin<
            Box<dyn Future<Output = Result<serde_json::Value, GenerationError>> + Send + 'a>,
        > = Box::pin(async move {
            generator.generate(&request, &RetryPolicy::default()).await
        });
        let value = generate.await?;
        let script: PodcastScript = decode(value)?;
        Ok(script.script)
    }
}

/// Stage 2: narration script → WAV data URI.
struct SpeakStage<'a, D: CrammerDriver> {
    generator: &'a Generator<D>,
}

#[async_trait]
impl<'a, D: CrammerDriver> Stage for SpeakStage<'a, D> {
    type Input = String;
    type Output = SpeechAudio;

    fn name(&self) -> &str {
        "speak"
    }

    async fn run(&self, script: String) -> Result<SpeechAudio, GenerationError> {
        // See the note in `SummarizeStage::run`: the copied-out handle
        // carries the concrete `'a`, sidestepping the higher-ranked
        // `Send` inference failure over `&self`.
        // See the note in `SummarizeStage::run`: the future owns its
        // input and captures only the fixed-lifetime handle, keeping
        // `Send` provable for a generic `D`.
        let generator: &'a Generator<D> = self.generator;
        let speak: Pin<
            Box<dyn Future<Output = Result<SpeechAudio, GenerationError>> + Send + 'a>,
        > = Box::pin(async move {
            generate_speech(generator, &SpeechInput { text: script }).await
        });
        speak.await
    }
}

/// Summarize lesson content and synthesize the summary as audio.
#[instrument(skip(generator, input), fields(topic = %input.topic))]
pub async fn summarize_and_speak<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &SummarizeAndSpeakInput,
) -> Result<SpeechAudio, GenerationError> {
    let chain = Chain::new(SummarizeStage { generator }, SpeakStage { generator });
    chain.run(input.clone()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_untouched() {
        let content = "The water cycle has three phases.";
        assert_eq!(truncate_content(content), content);
    }

    #[test]
    fn long_content_is_cut_on_a_char_boundary() {
        let content = "é".repeat(MAX_SUMMARY_INPUT_CHARS + 50);
        let truncated = truncate_content(&content);
        assert_eq!(truncated.chars().count(), MAX_SUMMARY_INPUT_CHARS);
    }
}
