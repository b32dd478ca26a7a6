//! Chained flow orchestration.
//!
//! A chain composes generation stages so that stage *k*'s validated
//! output supplies stage *k+1*'s input. Stages run strictly
//! sequentially, each with its own retry budget; any stage's terminal
//! failure abandons the whole chain and no partial result escapes.

use async_trait::async_trait;
use crammer_error::{GenerationError, GenerationErrorKind};
use tracing::{debug, warn};

/// One stage of a chained flow.
///
/// A stage owns its upstream-to-input mapping and its retry policy;
/// the chain only threads validated values through.
#[async_trait]
pub trait Stage: Send + Sync {
    /// What the stage consumes.
    type Input: Send + 'static;
    /// What the stage produces.
    type Output: Send + 'static;

    /// Stage name, used to attribute chain failures.
    fn name(&self) -> &str;

    /// Run the stage to completion (including its own retries).
    async fn run(&self, input: Self::Input) -> Result<Self::Output, GenerationError>;
}

/// Two stages composed in sequence.
///
/// `Chain` is itself a [`Stage`], so longer pipelines compose by
/// nesting: `a.then(b).then(c)`.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
    name: String,
}

impl<A, B> Chain<A, B>
where
    A: Stage,
    B: Stage<Input = A::Output>,
{
    /// Compose two stages.
    pub fn new(first: A, second: B) -> Self {
        let name = format!("{}>{}", first.name(), second.name());
        Self {
            first,
            second,
            name,
        }
    }
}

#[async_trait]
impl<A, B> Stage for Chain<A, B>
where
    A: Stage,
    B: Stage<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: Self::Input) -> Result<Self::Output, GenerationError> {
        debug!(stage = self.first.name(), "Running chain stage");
        let intermediate = self
            .first
            .run(input)
            .await
            .map_err(|error| stage_error(self.first.name(), error))?;

        debug!(stage = self.second.name(), "Running chain stage");
        self.second
            .run(intermediate)
            .await
            .map_err(|error| stage_error(self.second.name(), error))
    }
}

/// Extension adapter for fluent composition.
pub trait StageExt: Stage + Sized {
    /// Feed this stage's output into the next.
    fn then<B>(self, next: B) -> Chain<Self, B>
    where
        B: Stage<Input = Self::Output>,
    {
        Chain::new(self, next)
    }
}

impl<S: Stage + Sized> StageExt for S {}

/// Wrap a stage failure, preserving an inner chain's attribution.
fn stage_error(stage: &str, error: GenerationError) -> GenerationError {
    if matches!(error.kind(), GenerationErrorKind::ChainStage { .. }) {
        return error;
    }
    warn!(stage, %error, "Chain stage failed; abandoning chain");
    GenerationError::new(GenerationErrorKind::ChainStage {
        stage: stage.to_string(),
        cause: Box::new(error),
    })
}
