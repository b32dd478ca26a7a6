//! Wire-level tool declarations.

use crammer_schema::Schema;
use serde::{Deserialize, Serialize};

/// A tool declaration as sent to the backend.
///
/// This is the wire-facing half of a tool registration: name, guidance
/// text, and the argument/result shapes. The executable handler binding
/// lives with the generation client, not here, so requests stay plain
/// data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Name the model uses to invoke the tool
    pub name: String,
    /// Guidance describing when the model should call it
    pub description: String,
    /// Shape of the arguments the model must supply
    pub input_schema: Schema,
    /// Shape of the result the tool hands back
    pub output_schema: Schema,
}

impl ToolSpec {
    /// Creates a new tool declaration.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Schema,
        output_schema: Schema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema,
        }
    }
}
