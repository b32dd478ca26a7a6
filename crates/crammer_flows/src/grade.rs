//! Written-answer grading flow.

use crate::support::decode;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Input for grading a student's written answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeWrittenAnswerInput {
    /// The exam question that was asked
    pub question: String,
    /// Marks the question is worth
    pub marks: u8,
    /// The student's answer
    pub user_answer: String,
    /// The detailed mark scheme or model answer
    pub mark_scheme: String,
}

/// Feedback and marks for a written answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedAnswer {
    /// Constructive HTML feedback walking through the marking points
    pub feedback: String,
    /// Marks awarded, never exceeding the marks available
    #[serde(rename = "marksAwarded")]
    pub marks_awarded: u8,
}

/// The awarded marks are bounded by the marks available, so the schema
/// is built per request.
fn grading_schema(marks: u8) -> Schema {
    Schema::object([
        Field::required("feedback", Schema::non_empty_string()).describe(
            "Detailed, constructive feedback for the student, formatted as HTML, explaining which marking points were hit and which were missed.",
        ),
        Field::required("marksAwarded", Schema::integer_range(0, i64::from(marks)))
            .describe("The number of marks awarded for the answer."),
    ])
}

fn grading_prompt(input: &GradeWrittenAnswerInput) -> String {
    format!(
        r#"You are an expert GCSE examiner with a friendly and encouraging tone. Your task is to mark a student's answer against the provided mark scheme.

You must provide detailed, constructive feedback formatted in HTML. Do not just say if the answer is right or wrong. Explain *why*.

Your feedback should follow this structure:
1. Start with a positive and encouraging opening.
2. Create a <ul> list. For each point in the mark scheme, create a <li>.
3. Inside each <li>, state the marking point. Then, say whether the student's answer achieved this point. Use a "✅" emoji if they got the point and a "❌" if they missed it.
4. Provide a brief quote or explanation of why they did or did not get the mark.
5. After the list, provide a summary of how they could improve.
6. Finally, determine the total marks awarded.

Here is the information:
Question: "{question}"
Marks available: {marks}
Mark Scheme: "{mark_scheme}"
Student's Answer: "{user_answer}""#,
        question = input.question,
        marks = input.marks,
        mark_scheme = input.mark_scheme,
        user_answer = input.user_answer,
    )
}

/// Grade a student's written answer against a mark scheme.
#[instrument(skip(generator, input), fields(marks = input.marks))]
pub async fn grade_written_answer<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &GradeWrittenAnswerInput,
) -> Result<GradedAnswer, GenerationError> {
    let request = GenerateRequest::prompt(grading_prompt(input), grading_schema(input.marks));
    let value = generator.generate(&request, &RetryPolicy::default()).await?;
    decode(value)
}
