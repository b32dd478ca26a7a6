//! Single written exam question flow.

use crate::support::decode;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Input for a written question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenQuestionInput {
    /// The topic to generate a question for
    pub topic: String,
    /// Marks the question should be worth (1-6; typically 2, 4 or 6)
    pub marks: u8,
}

/// A generated written question with its mark scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenQuestion {
    /// The open-ended question
    pub question: String,
    /// A concise, ideal answer
    pub answer: String,
    /// A detailed mark scheme in bullet points
    pub explanation: String,
    /// Marks the question is worth
    pub marks: u8,
}

fn written_question_schema() -> Schema {
    Schema::object([
        Field::required("question", Schema::non_empty_string())
            .describe("The generated open-ended question."),
        Field::required("answer", Schema::non_empty_string())
            .describe("A concise, ideal answer to the question."),
        Field::required("explanation", Schema::string()).describe(
            "A detailed mark scheme explaining how marks are awarded. Use bullet points for clarity.",
        ),
        Field::required("marks", Schema::integer_range(1, 6))
            .describe("The number of marks the question is worth."),
    ])
}

fn written_prompt(topic: &str, marks: u8) -> String {
    format!(
        r#"You are an expert GCSE examiner.
Generate a single, challenging, open-ended exam-style question for the following topic worth {marks} marks.
The question should require a written answer, not a multiple-choice selection.
Also provide a concise, ideal answer and a detailed mark scheme. The mark scheme should be broken down into bullet points, explaining exactly where each mark comes from.
Ensure the 'marks' field in the output JSON is set to {marks}.

Topic: {topic}"#
    )
}

/// Generate a written exam question for a topic.
#[instrument(skip(generator, input), fields(topic = %input.topic, marks = input.marks))]
pub async fn generate_written_question<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &WrittenQuestionInput,
) -> Result<WrittenQuestion, GenerationError> {
    let marks = input.marks.clamp(1, 6);
    let request =
        GenerateRequest::prompt(written_prompt(&input.topic, marks), written_question_schema());
    let value = generator.generate(&request, &RetryPolicy::default()).await?;
    decode(value)
}
