//! Fill-in-the-gaps (cloze) test flow.

use crate::support::decode;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Input for a cloze test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClozeTestInput {
    /// The topic to generate the test for
    pub topic: String,
}

/// One gapped sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClozeQuestion {
    /// A sentence with a key term replaced by "______"
    pub sentence: String,
    /// The word that was removed
    pub answer: String,
}

/// A generated cloze test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClozeTest {
    /// Title of the test
    pub title: String,
    /// The gapped sentences
    pub questions: Vec<ClozeQuestion>,
}

fn cloze_schema() -> Schema {
    Schema::object([
        Field::required("title", Schema::non_empty_string())
            .describe("The title of the cloze test."),
        Field::required(
            "questions",
            Schema::array(Schema::object([
                Field::required("sentence", Schema::string()).describe(
                    "A sentence with a key term replaced by \"______\" (six underscores).",
                ),
                Field::required("answer", Schema::string())
                    .describe("The word that was removed from the sentence."),
            ])),
        ),
    ])
}

fn cloze_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert GCSE examiner.
Create a "fill-in-the-gaps" (cloze) test with 8 sentences for the given topic.
Each sentence should test a key concept or vocabulary word.
Replace a single, important keyword in each sentence with "______" (six underscores).

Topic: {topic}"#
    )
}

/// Generate a cloze test for a topic.
#[instrument(skip(generator, input), fields(topic = %input.topic))]
pub async fn generate_cloze_test<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &ClozeTestInput,
) -> Result<ClozeTest, GenerationError> {
    let request = GenerateRequest::prompt(cloze_prompt(&input.topic), cloze_schema());
    let value = generator.generate(&request, &RetryPolicy::default()).await?;
    decode(value)
}
