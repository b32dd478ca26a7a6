//! Chained flow orchestration behavior.

use async_trait::async_trait;
use crammer_client::{Chain, Stage, StageExt};
use crammer_error::{GenerationError, GenerationErrorKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stage that uppercases its input and counts runs.
struct Shout {
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl Stage for Shout {
    type Input = String;
    type Output = String;

    fn name(&self) -> &str {
        "shout"
    }

    async fn run(&self, input: String) -> Result<String, GenerationError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(input.to_uppercase())
    }
}

/// Stage that decorates its input.
struct Decorate;

#[async_trait]
impl Stage for Decorate {
    type Input = String;
    type Output = String;

    fn name(&self) -> &str {
        "decorate"
    }

    async fn run(&self, input: String) -> Result<String, GenerationError> {
        Ok(format!("<<{input}>>"))
    }
}

/// Stage that always fails with an exhausted-retries error.
struct Exhausted;

#[async_trait]
impl Stage for Exhausted {
    type Input = String;
    type Output = String;

    fn name(&self) -> &str {
        "speak"
    }

    async fn run(&self, _input: String) -> Result<String, GenerationError> {
        let cause = GenerationError::new(GenerationErrorKind::Unavailable {
            message: "model overloaded".to_string(),
        });
        Err(GenerationError::new(GenerationErrorKind::ExhaustedRetries {
            attempts: 3,
            cause: Box::new(cause),
        }))
    }
}

#[tokio::test]
async fn stages_run_in_sequence() {
    let runs = Arc::new(AtomicUsize::new(0));
    let chain = Chain::new(Shout { runs }, Decorate);

    let out = chain.run("podcast script".to_string()).await.unwrap();
    assert_eq!(out, "<<PODCAST SCRIPT>>");
    assert_eq!(chain.name(), "shout>decorate");
}

#[tokio::test]
async fn second_stage_failure_abandons_the_chain() {
    let runs = Arc::new(AtomicUsize::new(0));
    let chain = Shout { runs: runs.clone() }.then(Exhausted);

    let err = chain.run("lesson content".to_string()).await.unwrap_err();

    assert_eq!(runs.load(Ordering::SeqCst), 1, "stage 1 ran before the failure");
    match err.kind() {
        GenerationErrorKind::ChainStage { stage, cause } => {
            assert_eq!(stage, "speak");
            assert!(matches!(
                cause.kind(),
                GenerationErrorKind::ExhaustedRetries { .. }
            ));
        }
        other => panic!("expected ChainStage, got {other}"),
    }
}

#[tokio::test]
async fn first_stage_failure_skips_the_second() {
    let runs = Arc::new(AtomicUsize::new(0));
    let chain = Exhausted.then(Shout { runs: runs.clone() });

    let err = chain.run("content".to_string()).await.unwrap_err();

    assert_eq!(runs.load(Ordering::SeqCst), 0, "stage 2 must not start");
    assert!(matches!(
        err.kind(),
        GenerationErrorKind::ChainStage { stage, .. } if stage == "speak"
    ));
}

#[tokio::test]
async fn nested_chains_preserve_the_failing_stage_name() {
    let runs = Arc::new(AtomicUsize::new(0));
    let chain = Shout { runs: runs.clone() }
        .then(Decorate)
        .then(Exhausted);

    let err = chain.run("content".to_string()).await.unwrap_err();

    // The innermost failing stage is named, not the composite.
    assert!(matches!(
        err.kind(),
        GenerationErrorKind::ChainStage { stage, .. } if stage == "speak"
    ));
}

#[tokio::test]
async fn three_stage_chain_threads_values_through() {
    let runs = Arc::new(AtomicUsize::new(0));
    let chain = Shout { runs }.then(Decorate).then(Decorate);

    let out = chain.run("ok".to_string()).await.unwrap();
    assert_eq!(out, "<<<<OK>>>>");
}
