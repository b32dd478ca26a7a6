//! Exam question explanation flow.

use crate::support::decode;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Input for explaining an exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainQuestionInput {
    /// The exam question the student needs help with
    pub question: String,
    /// The subject topic of the question
    pub topic: String,
}

/// Guidance on how to approach a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionExplanation {
    /// HTML-formatted guidance; never the answer itself
    pub explanation: String,
}

fn explanation_schema() -> Schema {
    Schema::object([Field::required("explanation", Schema::non_empty_string())
        .describe("A helpful explanation of the question, formatted as HTML.")])
}

fn explanation_prompt(input: &ExplainQuestionInput) -> String {
    format!(
        r#"You are a friendly and encouraging GCSE tutor. A student is stuck on an exam question and has asked for help.

Your task is to explain the question to them. Do NOT give them the answer.

Instead, you should:
1. Break down the question into smaller parts.
2. Define any key terms in the question.
3. Explain the core concepts the question is testing.
4. Give them a hint about how to structure their answer or what to include.
5. Keep your tone supportive and helpful.

Topic: {topic}
Question: "{question}""#,
        topic = input.topic,
        question = input.question,
    )
}

/// Explain an exam question without revealing the answer.
#[instrument(skip(generator, input), fields(topic = %input.topic))]
pub async fn explain_exam_question<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &ExplainQuestionInput,
) -> Result<QuestionExplanation, GenerationError> {
    let request = GenerateRequest::prompt(explanation_prompt(input), explanation_schema());
    let value = generator.generate(&request, &RetryPolicy::default()).await?;
    decode(value)
}
