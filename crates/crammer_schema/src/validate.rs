//! Schema validation.
//!
//! Validation is a pure function over a [`Schema`] and an arbitrary JSON
//! value. It reports the first violated field only, with a JSON path, so
//! callers get one actionable failure rather than a wall of noise.

use crate::{Field, Schema};
use serde_json::Value;

/// Why a value failed validation.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum ViolationKind {
    /// A required field was absent.
    #[display("required field is missing")]
    MissingField,
    /// The value had the wrong JSON type.
    #[display("expected {expected}")]
    WrongType {
        /// The expected JSON type.
        expected: &'static str,
    },
    /// A number fell outside its declared inclusive bounds.
    #[display("value {value} is outside the range {min}..={max}")]
    OutOfRange {
        /// The offending value.
        value: f64,
        /// Inclusive lower bound (negative infinity if unbounded).
        min: f64,
        /// Inclusive upper bound (positive infinity if unbounded).
        max: f64,
    },
    /// A number was declared whole but had a fractional part.
    #[display("value {value} is not a whole number")]
    NotAnInteger {
        /// The offending value.
        value: f64,
    },
    /// A string was shorter than its declared minimum length.
    #[display("string is shorter than {min_len} characters")]
    TooShort {
        /// Declared minimum length.
        min_len: usize,
    },
    /// A string was not a member of its declared enum set.
    #[display("'{value}' is not one of the permitted values")]
    NotInEnum {
        /// The offending value.
        value: String,
    },
    /// An array had too few or too many elements.
    #[display("array has {actual} elements, expected between {min} and {max}")]
    BadArity {
        /// Actual element count.
        actual: usize,
        /// Minimum element count.
        min: usize,
        /// Maximum element count.
        max: usize,
    },
    /// A value satisfied none of an untagged alternative's shapes.
    #[display("value matches none of the {count} permitted shapes")]
    NoAlternative {
        /// How many shapes were tried.
        count: usize,
    },
    /// A union value's discriminator did not select any variant.
    #[display("discriminator '{value}' does not match any variant")]
    UnknownVariant {
        /// The offending discriminator value.
        value: String,
    },
}

/// The first violated field found during validation.
///
/// # Examples
///
/// ```
/// use crammer_schema::{Field, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object([Field::required("marks", Schema::integer_range(1, 6))]);
/// let violation = schema.validate(&json!({ "marks": 9 })).unwrap_err();
/// assert_eq!(violation.path(), "marks");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolation {
    path: String,
    kind: ViolationKind,
}

impl SchemaViolation {
    fn new(path: &str, kind: ViolationKind) -> Self {
        Self {
            path: if path.is_empty() { "$".to_string() } else { path.to_string() },
            kind,
        }
    }

    /// JSON path of the violated field (`$` for the root value).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The violation kind.
    pub fn kind(&self) -> &ViolationKind {
        &self.kind
    }
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field `{}`: {}", self.path, self.kind)
    }
}

impl std::error::Error for SchemaViolation {}

impl Schema {
    /// Validate a value against this schema.
    ///
    /// Pure function: no side effects, deterministic. Returns the first
    /// violated field on failure. Fields not declared by the schema are
    /// ignored, matching the backend's permissive structured output.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        validate_at(self, value, "")
    }
}

fn validate_at(schema: &Schema, value: &Value, path: &str) -> Result<(), SchemaViolation> {
    match schema {
        Schema::String { min_len } => {
            let text = value
                .as_str()
                .ok_or_else(|| SchemaViolation::new(path, ViolationKind::WrongType {
                    expected: "string",
                }))?;
            if let Some(min_len) = min_len
                && text.chars().count() < *min_len
            {
                return Err(SchemaViolation::new(
                    path,
                    ViolationKind::TooShort { min_len: *min_len },
                ));
            }
            Ok(())
        }
        Schema::Number { min, max, integer } => {
            let number = value
                .as_f64()
                .ok_or_else(|| SchemaViolation::new(path, ViolationKind::WrongType {
                    expected: "number",
                }))?;
            if *integer && number.fract() != 0.0 {
                return Err(SchemaViolation::new(
                    path,
                    ViolationKind::NotAnInteger { value: number },
                ));
            }
            let lo = min.unwrap_or(f64::NEG_INFINITY);
            let hi = max.unwrap_or(f64::INFINITY);
            if number < lo || number > hi {
                return Err(SchemaViolation::new(
                    path,
                    ViolationKind::OutOfRange {
                        value: number,
                        min: lo,
                        max: hi,
                    },
                ));
            }
            Ok(())
        }
        Schema::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(SchemaViolation::new(path, ViolationKind::WrongType {
                    expected: "boolean",
                }))
            }
        }
        Schema::Enum(permitted) => {
            let text = value
                .as_str()
                .ok_or_else(|| SchemaViolation::new(path, ViolationKind::WrongType {
                    expected: "string",
                }))?;
            if permitted.iter().any(|candidate| candidate == text) {
                Ok(())
            } else {
                Err(SchemaViolation::new(path, ViolationKind::NotInEnum {
                    value: text.to_string(),
                }))
            }
        }
        Schema::Array {
            items,
            min_items,
            max_items,
        } => {
            let elements = value
                .as_array()
                .ok_or_else(|| SchemaViolation::new(path, ViolationKind::WrongType {
                    expected: "array",
                }))?;
            let min = min_items.unwrap_or(0);
            let max = max_items.unwrap_or(usize::MAX);
            if elements.len() < min || elements.len() > max {
                return Err(SchemaViolation::new(
                    path,
                    ViolationKind::BadArity {
                        actual: elements.len(),
                        min,
                        max,
                    },
                ));
            }
            for (index, element) in elements.iter().enumerate() {
                validate_at(items, element, &format!("{path}[{index}]"))?;
            }
            Ok(())
        }
        Schema::Object(fields) => validate_fields(fields, value, path),
        Schema::OneOf(alternatives) => {
            if alternatives
                .iter()
                .any(|alternative| validate_at(alternative, value, path).is_ok())
            {
                Ok(())
            } else {
                Err(SchemaViolation::new(path, ViolationKind::NoAlternative {
                    count: alternatives.len(),
                }))
            }
        }
        Schema::Union { tag, variants } => {
            let object = value
                .as_object()
                .ok_or_else(|| SchemaViolation::new(path, ViolationKind::WrongType {
                    expected: "object",
                }))?;
            let tag_path = join(path, tag);
            let discriminator = object
                .get(tag)
                .ok_or_else(|| SchemaViolation::new(&tag_path, ViolationKind::MissingField))?;
            let discriminator = discriminator.as_str().ok_or_else(|| {
                SchemaViolation::new(&tag_path, ViolationKind::WrongType { expected: "string" })
            })?;
            let variant = variants
                .iter()
                .find(|variant| variant.tag_value == discriminator)
                .ok_or_else(|| {
                    SchemaViolation::new(&tag_path, ViolationKind::UnknownVariant {
                        value: discriminator.to_string(),
                    })
                })?;
            validate_at(&variant.schema, value, path)
        }
    }
}

fn validate_fields(fields: &[Field], value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let object = value
        .as_object()
        .ok_or_else(|| SchemaViolation::new(path, ViolationKind::WrongType {
            expected: "object",
        }))?;

    for field in fields {
        let field_path = join(path, &field.name);
        match object.get(&field.name) {
            Some(Value::Null) | None => {
                if field.required {
                    return Err(SchemaViolation::new(&field_path, ViolationKind::MissingField));
                }
            }
            Some(present) => validate_at(&field.schema, present, &field_path)?,
        }
    }
    Ok(())
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use serde_json::json;

    fn written_question() -> Schema {
        Schema::object([
            Field::required("question", Schema::string()),
            Field::required("marks", Schema::integer_range(1, 6)),
            Field::required("answer", Schema::string()),
        ])
    }

    #[test]
    fn accepts_conformant_payload() {
        let payload = json!({
            "question": "Describe osmosis.",
            "marks": 4,
            "answer": "Movement of water across a partially permeable membrane."
        });
        assert!(written_question().validate(&payload).is_ok());
    }

    #[test]
    fn reports_missing_required_field() {
        let payload = json!({ "question": "Describe osmosis.", "marks": 4 });
        let violation = written_question().validate(&payload).unwrap_err();
        assert_eq!(violation.path(), "answer");
        assert_eq!(*violation.kind(), ViolationKind::MissingField);
    }

    #[test]
    fn null_counts_as_missing() {
        let payload = json!({ "question": "q", "marks": 2, "answer": null });
        let violation = written_question().validate(&payload).unwrap_err();
        assert_eq!(violation.path(), "answer");
        assert_eq!(*violation.kind(), ViolationKind::MissingField);
    }

    #[test]
    fn rejects_out_of_range_marks() {
        let payload = json!({ "question": "q", "marks": 9, "answer": "a" });
        let violation = written_question().validate(&payload).unwrap_err();
        assert_eq!(violation.path(), "marks");
        assert!(matches!(
            violation.kind(),
            ViolationKind::OutOfRange { value, .. } if *value == 9.0
        ));
    }

    #[test]
    fn rejects_fractional_integer() {
        let payload = json!({ "question": "q", "marks": 2.5, "answer": "a" });
        let violation = written_question().validate(&payload).unwrap_err();
        assert!(matches!(
            violation.kind(),
            ViolationKind::NotAnInteger { value } if *value == 2.5
        ));
    }

    #[test]
    fn rejects_enum_outside_declared_set() {
        let schema = Schema::object([Field::required(
            "difficulty",
            Schema::enumeration(["easy", "medium", "hard"]),
        )]);
        let violation = schema
            .validate(&json!({ "difficulty": "impossible" }))
            .unwrap_err();
        assert_eq!(violation.path(), "difficulty");
        assert!(matches!(violation.kind(), ViolationKind::NotInEnum { .. }));
    }

    #[test]
    fn validates_array_elements_with_indexed_paths() {
        let schema = Schema::object([Field::required(
            "questions",
            Schema::array(written_question()),
        )]);
        let payload = json!({
            "questions": [
                { "question": "q1", "marks": 1, "answer": "a1" },
                { "question": "q2", "marks": 0, "answer": "a2" },
            ]
        });
        let violation = schema.validate(&payload).unwrap_err();
        assert_eq!(violation.path(), "questions[1].marks");
    }

    #[test]
    fn union_discriminates_on_tag() {
        let schema = Schema::union(
            "quizType",
            [
                (
                    "multiple-choice",
                    Schema::object([
                        Field::required("question", Schema::string()),
                        Field::required("options", Schema::array(Schema::string())),
                    ]),
                ),
                (
                    "fill-in-the-blanks",
                    Schema::object([
                        Field::required("sentence", Schema::string()),
                        Field::required("answer", Schema::string()),
                    ]),
                ),
            ],
        );

        let good = json!({
            "quizType": "fill-in-the-blanks",
            "sentence": "Plants make food by ______.",
            "answer": "photosynthesis"
        });
        assert!(schema.validate(&good).is_ok());

        let wrong_shape = json!({
            "quizType": "multiple-choice",
            "sentence": "no options here",
            "answer": "x"
        });
        let violation = schema.validate(&wrong_shape).unwrap_err();
        assert_eq!(violation.path(), "question");

        let unknown = json!({ "quizType": "essay", "sentence": "s", "answer": "a" });
        let violation = schema.validate(&unknown).unwrap_err();
        assert!(matches!(
            violation.kind(),
            ViolationKind::UnknownVariant { value } if value == "essay"
        ));
    }

    #[test]
    fn one_of_accepts_either_shape() {
        let schema = Schema::one_of([Schema::string(), Schema::array(Schema::string())]);
        assert!(schema.validate(&json!("one answer")).is_ok());
        assert!(schema.validate(&json!(["a", "b"])).is_ok());

        let violation = schema.validate(&json!(42)).unwrap_err();
        assert!(matches!(
            violation.kind(),
            ViolationKind::NoAlternative { count: 2 }
        ));
    }

    #[test]
    fn undeclared_fields_are_ignored() {
        let payload = json!({
            "question": "q",
            "marks": 3,
            "answer": "a",
            "extra": { "anything": true }
        });
        assert!(written_question().validate(&payload).is_ok());
    }
}
