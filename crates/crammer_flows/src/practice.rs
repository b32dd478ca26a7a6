//! Practice exam paper flow.

use crate::quiz::{QuizQuestion, practice_quiz_schema};
use crate::support::decode;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Question difficulty levels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Input for a practice paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeQuestionsInput {
    /// Comma-separated topics, e.g. "B1: Cell Biology, B4: Bioenergetics"
    pub topic: String,
    /// Paper difficulty
    pub difficulty: Difficulty,
    /// Summary of the student's performance and weak areas
    pub performance_summary: String,
    /// Number of questions to generate (1-10)
    pub question_count: u8,
}

/// A generated practice paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticePaper {
    /// The mixed-type questions
    pub questions: Vec<QuizQuestion>,
}

fn practice_schema() -> Schema {
    Schema::object([
        Field::required("questions", Schema::array(practice_quiz_schema(6)))
            .describe("An array of practice questions."),
    ])
}

fn practice_prompt(input: &PracticeQuestionsInput, question_count: u8) -> String {
    format!(
        r#"You are an expert GCSE examiner. Your task is to create a practice exam paper.
You MUST generate {question_count} practice questions on the following topics: {topic}.
The difficulty of the paper should be {difficulty}.

Crucially, the questions you generate should be based on the style and content of real past exam papers.

You MUST generate a mix of different question types. Include 'multiple-choice', 'written-question' and 'fill-in-the-gaps' questions to create a varied mock exam paper.
Ensure some of the written questions are for higher marks (4-6 marks) to properly challenge the student.

The user has provided the following context, but you should prioritize generating questions based on the selected topics:
User Context: {performance_summary}"#,
        topic = input.topic,
        difficulty = input.difficulty,
        performance_summary = input.performance_summary,
    )
}

/// Generate a mixed practice paper tailored to the student.
#[instrument(skip(generator, input), fields(difficulty = %input.difficulty, count = input.question_count))]
pub async fn generate_practice_questions<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &PracticeQuestionsInput,
) -> Result<PracticePaper, GenerationError> {
    let question_count = input.question_count.clamp(1, 10);
    let request =
        GenerateRequest::prompt(practice_prompt(input, question_count), practice_schema());
    let value = generator.generate(&request, &RetryPolicy::default()).await?;
    decode(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn difficulty_round_trips_as_lowercase() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!(Difficulty::from_str("hard").unwrap(), Difficulty::Hard);
        let encoded = serde_json::to_string(&Difficulty::Easy).unwrap();
        assert_eq!(encoded, "\"easy\"");
    }
}
