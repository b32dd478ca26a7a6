//! Matching pairs quiz flow.

use crate::quiz::{MatchingPair, matching_pair_schema};
use crate::support::decode;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Input for a matching quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingQuizInput {
    /// The topic to generate the quiz for
    pub topic: String,
}

/// A generated matching quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingQuiz {
    /// Title of the quiz
    pub title: String,
    /// The pairs to reconnect
    pub pairs: Vec<MatchingPair>,
}

fn matching_quiz_schema() -> Schema {
    Schema::object([
        Field::required("title", Schema::non_empty_string())
            .describe("The title of the matching quiz."),
        Field::required("pairs", Schema::array_bounded(matching_pair_schema(), 1, 12))
            .describe("An array of 8 matching pairs."),
    ])
}

fn matching_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert GCSE examiner.
Create a matching pairs quiz with exactly 8 pairs for the given topic.
The pairs should connect key terms to their definitions, formulas to their names, or concepts to their explanations.
Each pair must have a unique ID from "item-1" to "item-8".

Topic: {topic}"#
    )
}

/// Generate a matching pairs quiz for a topic.
#[instrument(skip(generator, input), fields(topic = %input.topic))]
pub async fn generate_matching_quiz<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &MatchingQuizInput,
) -> Result<MatchingQuiz, GenerationError> {
    let request = GenerateRequest::prompt(matching_prompt(&input.topic), matching_quiz_schema());
    let value = generator.generate(&request, &RetryPolicy::default()).await?;
    decode(value)
}
