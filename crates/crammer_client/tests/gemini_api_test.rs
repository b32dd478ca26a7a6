//! Tests against the real Gemini API.
//!
//! These require a `GEMINI_API_KEY` in the environment (or a `.env`
//! file) and are ignored by default.
//!
//! Run with: cargo test --package crammer_client -- --ignored

use crammer_client::{CrammerDriver, GeminiClient, Generator};
use crammer_core::{GenerateRequest, RetryPolicy};
use crammer_schema::{Field, Schema};

#[tokio::test]
#[ignore] // Requires GEMINI_API_KEY and network access
async fn structured_generation_round_trip() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let client = GeminiClient::from_env()?;
    let generator = Generator::new(client);

    let request = GenerateRequest::prompt(
        "Summarise photosynthesis for a GCSE student in one sentence.",
        Schema::object([Field::required("summary", Schema::non_empty_string())]),
    );

    let value = generator.generate(&request, &RetryPolicy::default()).await?;
    println!("summary: {}", value["summary"]);
    assert!(value["summary"].as_str().is_some());
    Ok(())
}

#[tokio::test]
#[ignore]
async fn driver_reports_provider_metadata() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let client = GeminiClient::from_env()?;
    assert_eq!(client.provider_name(), "gemini");
    assert_eq!(client.model_name(), "gemini-2.5-flash");
    Ok(())
}
