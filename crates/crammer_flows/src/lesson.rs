//! Interactive lesson generation flow.
//!
//! The lesson author asks the backend for a supporting video per
//! content section via a registered search tool, so this flow exercises
//! the tool-invocation loop.

use crate::quiz::{QuizQuestion, lesson_quiz_schema};
use crate::support::decode;
use async_trait::async_trait;
use crammer_client::{CrammerDriver, Generator, ToolDeclaration, ToolHandler, ToolSet};
use crammer_core::{GenerateRequest, RetryPolicy, ToolSpec};
use crammer_error::GenerationError;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Input for lesson generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonInput {
    /// The topic to build the lesson around
    pub topic: String,
}

/// One slide of a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSlide {
    /// Slide title
    pub title: String,
    /// HTML content for the slide
    pub content: String,
    /// Comprehension check for the slide
    pub quiz: QuizQuestion,
    /// A supporting video for the slide, found via the search tool
    #[serde(rename = "videoUrl")]
    pub video_url: Option<String>,
}

/// A complete generated lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Overall lesson title
    pub title: String,
    /// Learning objectives
    pub objectives: Vec<String>,
    /// Engaging HTML introduction
    pub introduction: String,
    /// The content slides
    pub slides: Vec<LessonSlide>,
    /// Closing HTML summary of the key points
    pub summary: String,
}

/// Wire declaration of the video search tool: a free-text query in, a
/// single URL out.
pub fn video_search_spec() -> ToolSpec {
    ToolSpec::new(
        "search_videos",
        "Searches for a short, relevant revision video about a specific topic.",
        Schema::object([Field::required("query", Schema::non_empty_string())
            .describe("A simple search query, e.g. \"cell biology\" or \"atomic structure\".")]),
        Schema::object([Field::required("url", Schema::non_empty_string())
            .describe("The URL of the most relevant video.")]),
    )
}

/// Default video search handler.
///
/// Builds a search-results URL scoped to trusted revision channels
/// rather than calling a video API. Pure and repeatable, so it is
/// trivially safe across retries; swap in an API-backed handler via
/// [`generate_lesson_with_tools`] for real lookups.
#[derive(Debug, Clone, Default)]
pub struct VideoSearchTool;

#[async_trait]
impl ToolHandler for VideoSearchTool {
    async fn call(&self, arguments: Value) -> Result<Value, String> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| "missing query".to_string())?;
        debug!(query, "Searching for a revision video");

        let scoped = format!(
            "{query} (site:youtube.com/c/mrallsophistory OR site:youtube.com/c/simplehistory)"
        );
        let encoded: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("search_query", &scoped)
            .finish();
        Ok(json!({
            "url": format!("https://www.youtube.com/results?{encoded}"),
        }))
    }
}

/// The default tool set for lesson generation.
pub fn lesson_tools() -> ToolSet {
    ToolSet::new().with(ToolDeclaration::new(
        video_search_spec(),
        Arc::new(VideoSearchTool),
    ))
}

fn lesson_schema() -> Schema {
    let slide = Schema::object([
        Field::required("title", Schema::non_empty_string())
            .describe("A short, engaging title for this section of the lesson."),
        Field::required("content", Schema::non_empty_string()).describe(
            "The main educational content for this slide, formatted as HTML. This should be detailed and well-explained.",
        ),
        Field::required("quiz", lesson_quiz_schema(4)).describe(
            "A quiz question to test understanding of the content on this slide.",
        ),
        Field::optional("videoUrl", Schema::string())
            .describe("A relevant video URL for this slide."),
    ]);

    Schema::object([
        Field::required("title", Schema::non_empty_string())
            .describe("The overall title of the lesson."),
        Field::required("objectives", Schema::array(Schema::string()))
            .describe("A list of clear learning objectives for the lesson."),
        Field::required("introduction", Schema::non_empty_string())
            .describe("An engaging introduction to the topic, formatted as HTML."),
        Field::required("slides", Schema::array(slide))
            .describe("An array of lesson \"slides\", each covering a part of the topic."),
        Field::required("summary", Schema::non_empty_string())
            .describe("A final summary of the key points of the lesson, formatted as HTML."),
    ])
}

fn lesson_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert GCSE teacher. Your task is to create a complete, engaging, and detailed lesson plan for the given topic, ensuring all content is strictly aligned with the GCSE curriculum. You must use effective teaching techniques to help a student learn and retain information.

Topic: {topic}

Structure the lesson as follows:
1. **Title:** A clear, concise title for the lesson.
2. **Learning Objectives:** Create a list of 3-4 specific, measurable learning objectives from the syllabus.
3. **Introduction:** Write an engaging introduction. Use an analogy or a real-world example to connect the topic to something the student already knows.
4. **Slides:** Break the main content into 5-7 distinct "slides". Each slide must have:
   * A **title**.
   * Detailed **content** explaining a core concept, formatted in simple HTML (using <h2>, <h3>, <p>, <ul>, <li>, <strong>).
   * A **quiz** to check for understanding. You MUST vary the quiz type on each slide, choosing randomly between 'multiple-choice', 'written-question', and 'fill-in-the-blanks'.
     - For 'multiple-choice', occasionally use multiple correct answers.
     - For 'written-question', keep it concise (2-4 marks).
     - For 'fill-in-the-blanks', use "______" for the blank space.
   * **Video:** For each slide, use the search_videos tool to find a short, relevant video clip that explains the concept on the slide. Add the URL to the 'videoUrl' field.
5. **Summary:** Conclude with a summary of the most crucial points from the lesson.

**Teaching Style & Formatting:**
* Be clear, encouraging, and easy to understand for a 15-16 year old.
* Break down complex ideas into simple, manageable steps.
* Wrap all key terms, people, and dates in <strong> tags.

Generate the lesson plan based on these instructions."#
    )
}

/// Lesson generation is the heaviest flow, so it gets a longer backoff
/// unit than the product default.
fn lesson_retry_policy() -> RetryPolicy {
    RetryPolicy::new(2, Duration::from_millis(1500))
}

/// Generate a lesson with the default video search tool.
#[instrument(skip(generator, input), fields(topic = %input.topic))]
pub async fn generate_lesson<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &LessonInput,
) -> Result<Lesson, GenerationError> {
    generate_lesson_with_tools(generator, input, &lesson_tools()).await
}

/// Generate a lesson with caller-supplied tools.
///
/// The tool set must register a handler under the name declared by
/// [`video_search_spec`].
#[instrument(skip(generator, input, tools), fields(topic = %input.topic))]
pub async fn generate_lesson_with_tools<D: CrammerDriver>(
    generator: &Generator<D>,
    input: &LessonInput,
    tools: &ToolSet,
) -> Result<Lesson, GenerationError> {
    let request = GenerateRequest::prompt(lesson_prompt(&input.topic), lesson_schema());
    let value = generator
        .generate_with_tools(&request, tools, &lesson_retry_policy())
        .await?;
    decode(value)
}
