//! Tool registration: declarations bound to executable handlers.

use async_trait::async_trait;
use crammer_core::ToolSpec;
use serde_json::Value;
use std::sync::Arc;

/// An executable tool implementation.
///
/// Handlers may be asynchronous and I/O-bound (a network lookup, say).
/// A retried generation may reissue the same tool call, so handlers
/// must be safe to invoke more than once with the same arguments —
/// idempotent from the caller's perspective.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with validated arguments.
    ///
    /// The returned value is validated against the tool's declared
    /// output schema before being fed back into the generation.
    async fn call(&self, arguments: Value) -> Result<Value, String>;
}

/// A wire declaration bound to its handler.
#[derive(Clone)]
pub struct ToolDeclaration {
    spec: ToolSpec,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDeclaration {
    /// Bind a declaration to its implementation.
    pub fn new(spec: ToolSpec, handler: Arc<dyn ToolHandler>) -> Self {
        Self { spec, handler }
    }

    /// The wire-facing declaration.
    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// The bound implementation.
    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }
}

impl std::fmt::Debug for ToolDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDeclaration")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Tools registered for one generation request.
///
/// Registration is per request; the set carries no cross-request
/// state.
///
/// # Examples
///
/// ```
/// use crammer_client::ToolSet;
///
/// let tools = ToolSet::new();
/// assert!(tools.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    tools: Vec<ToolDeclaration>,
}

impl ToolSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, consuming and returning the set for chaining.
    pub fn with(mut self, declaration: ToolDeclaration) -> Self {
        self.tools.push(declaration);
        self
    }

    /// Register a tool in place.
    pub fn register(&mut self, declaration: ToolDeclaration) {
        self.tools.push(declaration);
    }

    /// Look up a declaration by the name the backend asked for.
    pub fn get(&self, name: &str) -> Option<&ToolDeclaration> {
        self.tools.iter().find(|tool| tool.spec().name == name)
    }

    /// The wire declarations, for embedding in a request.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|tool| tool.spec().clone()).collect()
    }

    /// Whether any tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
