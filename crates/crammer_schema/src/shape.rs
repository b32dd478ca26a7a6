//! Declarative output shapes.
//!
//! A [`Schema`] declares the structure a generation result must satisfy.
//! The same declaration serves two purposes: it is rendered into the
//! backend request (so the model is instructed to produce the shape) and
//! it validates the payload the backend actually returns.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A declarative description of a structured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Schema {
    /// A string value.
    String {
        /// Minimum length in characters, if bounded.
        min_len: Option<usize>,
    },
    /// A numeric value, optionally bounded.
    Number {
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
        /// Whether the value must be a whole number.
        integer: bool,
    },
    /// A boolean value.
    Boolean,
    /// A string drawn from a closed set.
    Enum(Vec<String>),
    /// An array of homogeneous elements.
    Array {
        /// Element shape.
        items: Box<Schema>,
        /// Minimum element count, if bounded.
        min_items: Option<usize>,
        /// Maximum element count, if bounded.
        max_items: Option<usize>,
    },
    /// An object with declared fields. Undeclared fields are ignored.
    Object(Vec<Field>),
    /// An untagged alternative: the value must satisfy at least one of
    /// the listed shapes.
    OneOf(Vec<Schema>),
    /// A tagged union: a discriminator field selects one of several
    /// object shapes.
    Union {
        /// Name of the discriminator field.
        tag: String,
        /// Variants, keyed by discriminator value.
        variants: Vec<UnionVariant>,
    },
}

/// A named field inside an [`Schema::Object`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field shape.
    pub schema: Schema,
    /// Whether the field must be present.
    pub required: bool,
    /// Guidance passed to the backend; not used during validation.
    pub description: Option<String>,
}

/// One alternative of a [`Schema::Union`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionVariant {
    /// The discriminator value selecting this variant.
    pub tag_value: String,
    /// The object shape of this variant (excluding the discriminator).
    pub schema: Schema,
}

impl Field {
    /// A required field.
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: true,
            description: None,
        }
    }

    /// An optional field.
    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: false,
            description: None,
        }
    }

    /// Attach backend-facing guidance to this field.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl Schema {
    /// An unbounded string.
    pub fn string() -> Self {
        Schema::String { min_len: None }
    }

    /// A string with a minimum length.
    pub fn non_empty_string() -> Self {
        Schema::String { min_len: Some(1) }
    }

    /// An unbounded number.
    pub fn number() -> Self {
        Schema::Number {
            min: None,
            max: None,
            integer: false,
        }
    }

    /// A whole number within an inclusive range.
    pub fn integer_range(min: i64, max: i64) -> Self {
        Schema::Number {
            min: Some(min as f64),
            max: Some(max as f64),
            integer: true,
        }
    }

    /// A boolean.
    pub fn boolean() -> Self {
        Schema::Boolean
    }

    /// A closed string set.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Enum(values.into_iter().map(Into::into).collect())
    }

    /// An array of the given element shape.
    pub fn array(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        }
    }

    /// An array with element-count bounds.
    pub fn array_bounded(items: Schema, min_items: usize, max_items: usize) -> Self {
        Schema::Array {
            items: Box::new(items),
            min_items: Some(min_items),
            max_items: Some(max_items),
        }
    }

    /// An object with the given fields.
    pub fn object<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        Schema::Object(fields.into_iter().collect())
    }

    /// An untagged alternative over several shapes.
    pub fn one_of<I>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = Schema>,
    {
        Schema::OneOf(alternatives.into_iter().collect())
    }

    /// A tagged union discriminated by `tag`.
    pub fn union<I, S>(tag: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = (S, Schema)>,
        S: Into<String>,
    {
        Schema::Union {
            tag: tag.into(),
            variants: variants
                .into_iter()
                .map(|(tag_value, schema)| UnionVariant {
                    tag_value: tag_value.into(),
                    schema,
                })
                .collect(),
        }
    }

    /// Render this declaration as an OpenAPI-style response schema for
    /// the backend request.
    ///
    /// Tagged unions become `anyOf` alternatives whose discriminator
    /// property is pinned to a single-value enum.
    pub fn to_response_schema(&self) -> Value {
        match self {
            Schema::String { .. } => json!({ "type": "string" }),
            Schema::Number { min, max, integer } => {
                let mut out = serde_json::Map::new();
                out.insert(
                    "type".to_string(),
                    Value::String(if *integer { "integer" } else { "number" }.to_string()),
                );
                if let Some(min) = min {
                    out.insert("minimum".to_string(), json!(min));
                }
                if let Some(max) = max {
                    out.insert("maximum".to_string(), json!(max));
                }
                Value::Object(out)
            }
            Schema::Boolean => json!({ "type": "boolean" }),
            Schema::Enum(values) => json!({ "type": "string", "enum": values }),
            Schema::Array {
                items,
                min_items,
                max_items,
            } => {
                let mut out = serde_json::Map::new();
                out.insert("type".to_string(), Value::String("array".to_string()));
                out.insert("items".to_string(), items.to_response_schema());
                if let Some(min) = min_items {
                    out.insert("minItems".to_string(), json!(min));
                }
                if let Some(max) = max_items {
                    out.insert("maxItems".to_string(), json!(max));
                }
                Value::Object(out)
            }
            Schema::Object(fields) => object_response_schema(fields, None),
            Schema::OneOf(alternatives) => json!({
                "anyOf": alternatives
                    .iter()
                    .map(Schema::to_response_schema)
                    .collect::<Vec<Value>>(),
            }),
            Schema::Union { tag, variants } => {
                let alternatives: Vec<Value> = variants
                    .iter()
                    .map(|variant| match &variant.schema {
                        Schema::Object(fields) => object_response_schema(
                            fields,
                            Some((tag.as_str(), variant.tag_value.as_str())),
                        ),
                        other => other.to_response_schema(),
                    })
                    .collect();
                json!({ "anyOf": alternatives })
            }
        }
    }
}

/// Render an object schema, optionally injecting a pinned discriminator
/// property.
fn object_response_schema(fields: &[Field], tag: Option<(&str, &str)>) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required: Vec<Value> = Vec::new();

    if let Some((tag_name, tag_value)) = tag {
        properties.insert(
            tag_name.to_string(),
            json!({ "type": "string", "enum": [tag_value] }),
        );
        required.push(Value::String(tag_name.to_string()));
    }

    for field in fields {
        let mut rendered = field.schema.to_response_schema();
        if let Some(description) = &field.description
            && let Value::Object(map) = &mut rendered
        {
            map.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        properties.insert(field.name.clone(), rendered);
        if field.required {
            required.push(Value::String(field.name.clone()));
        }
    }

    json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": required,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_schema_renders_bounds_and_required() {
        let schema = Schema::object([
            Field::required("question", Schema::string()),
            Field::required("marks", Schema::integer_range(1, 6)),
            Field::optional("hint", Schema::string()),
        ]);

        let rendered = schema.to_response_schema();
        assert_eq!(rendered["type"], "object");
        assert_eq!(rendered["properties"]["marks"]["minimum"], 1.0);
        assert_eq!(rendered["properties"]["marks"]["maximum"], 6.0);
        let required = rendered["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert!(!required.contains(&Value::String("hint".to_string())));
    }

    #[test]
    fn union_renders_any_of_with_pinned_tag() {
        let schema = Schema::union(
            "quizType",
            [
                (
                    "multiple-choice",
                    Schema::object([Field::required("question", Schema::string())]),
                ),
                (
                    "written-question",
                    Schema::object([Field::required("marks", Schema::integer_range(1, 4))]),
                ),
            ],
        );

        let rendered = schema.to_response_schema();
        let alternatives = rendered["anyOf"].as_array().unwrap();
        assert_eq!(alternatives.len(), 2);
        assert_eq!(
            alternatives[0]["properties"]["quizType"]["enum"][0],
            "multiple-choice"
        );
    }
}
