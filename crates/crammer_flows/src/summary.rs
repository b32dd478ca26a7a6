//! Topic summary and glossary flows.

use crate::support::decode;
use crammer_client::{CrammerDriver, Generator};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Input for a topic summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummaryInput {
    /// The topic to summarize
    pub topic: String,
}

/// A generated revision summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    /// HTML-formatted summary text
    pub summary: String,
}

/// Input for a glossary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntryInput {
    /// The term to define
    pub term: String,
}

/// A generated glossary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// A clear, concise explanation of the term
    pub explanation: String,
}

fn summary_schema() -> Schema {
    Schema::object([Field::required("summary", Schema::non_empty_string())
        .describe("A summary of the topic, formatted with HTML for rich text display.")])
}

fn summary_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert GCSE tutor creating a revision guide summary for a student.

Your task is to provide a detailed and comprehensive summary for the given topic, focusing only on the most crucial, must-know information from the syllabus. The summary should be clear, concise, and easy to understand. The output MUST be a single string containing valid HTML.

Please structure the summary logically into the following three sections, using HTML tags:
1. <h2>Key People</h2>: Use a <ul> with <li> for each person, detailing their significance.
2. <h2>Key Events</h2>: Use a <ul> with <li> for each event, explaining what happened and why it was important.
3. <h2>Key Dates</h2>: Use a <ul> with <li> for each key date, briefly stating the event.

Crucially, you MUST wrap all key terms, people, and dates in <strong> tags to make them bold.

Do not include conversational filler. Get straight to the point, but ensure the explanations are thorough enough for a student to revise from.

Topic: {topic}"#
    )
}

/// Generate a revision summary for a topic.
#[instrument(skip(generator, input), fields(topic = %input.topic))]
pub async fn provide_topic_summary<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &TopicSummaryInput,
) -> Result<TopicSummary, GenerationError> {
    let request = GenerateRequest::prompt(summary_prompt(&input.topic), summary_schema());
    let value = generator.generate(&request, &RetryPolicy::default()).await?;
    decode(value)
}

/// Generate a glossary entry for a term.
///
/// Delegates to the topic summary flow; a glossary entry is a summary
/// of a single term.
#[instrument(skip(generator, input), fields(term = %input.term))]
pub async fn generate_glossary_entry<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &GlossaryEntryInput,
) -> Result<GlossaryEntry, GenerationError> {
    let summary = provide_topic_summary(generator, &TopicSummaryInput {
        topic: input.term.clone(),
    })
    .await?;
    Ok(GlossaryEntry {
        explanation: summary.summary,
    })
}
