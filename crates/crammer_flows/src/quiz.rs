//! Quiz question types.
//!
//! The closed union of quiz shapes the backend may produce, tagged by
//! `quizType`. The same declarations drive both sides of the contract:
//! the serde types decode validated payloads, and the schema
//! constructors instruct the backend and validate its response.

use crate::answers::answer_matches;
use crammer_schema::{Field, Schema};
use serde::{Deserialize, Serialize};

/// The answer key of a multiple-choice question: a single correct
/// option or several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    /// One correct option
    One(String),
    /// Several correct options
    Many(Vec<String>),
}

impl AnswerKey {
    /// Whether a submitted answer matches any correct option.
    pub fn accepts(&self, submitted: &str) -> bool {
        match self {
            AnswerKey::One(answer) => answer_matches(submitted, answer),
            AnswerKey::Many(answers) => answers
                .iter()
                .any(|answer| answer_matches(submitted, answer)),
        }
    }

    /// How many selections a fully correct response needs.
    pub fn expected_count(&self) -> usize {
        match self {
            AnswerKey::One(_) => 1,
            AnswerKey::Many(answers) => answers.len(),
        }
    }
}

/// One item/match pair of a matching quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingPair {
    /// Unique identifier, e.g. "item-1"
    pub id: String,
    /// The first half of the pair (term, formula, concept)
    pub item: String,
    /// The corresponding second half (definition, unit, explanation)
    #[serde(rename = "match")]
    pub counterpart: String,
}

/// A quiz question, discriminated by `quizType`.
///
/// The gaps variant accepts both discriminator spellings found in
/// stored content (`fill-in-the-blanks` and `fill-in-the-gaps`) and
/// emits the former.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "quizType")]
pub enum QuizQuestion {
    /// Select one (or several) of the given options.
    #[serde(rename = "multiple-choice")]
    MultipleChoice {
        /// The question text
        question: String,
        /// Candidate answers
        options: Vec<String>,
        /// The correct option(s)
        answer: AnswerKey,
    },

    /// Open-ended exam-style question marked against a model answer.
    #[serde(rename = "written-question")]
    Written {
        /// The question text
        question: String,
        /// Marks available
        marks: u8,
        /// A concise ideal answer for checking
        answer: String,
    },

    /// A sentence with a key term blanked out as "______".
    #[serde(rename = "fill-in-the-blanks", alias = "fill-in-the-gaps")]
    FillInTheBlanks {
        /// The gapped sentence
        sentence: String,
        /// The removed word
        answer: String,
    },

    /// Match each item to its counterpart.
    #[serde(rename = "matching-pairs")]
    MatchingPairs {
        /// The pairs to reconnect
        pairs: Vec<MatchingPair>,
    },
}

/// Schema of the multiple-choice variant, minus the discriminator.
pub fn multiple_choice_schema() -> Schema {
    Schema::object([
        Field::required("question", Schema::string()).describe("The multiple-choice question."),
        Field::required("options", Schema::array(Schema::string()))
            .describe("An array of possible answers."),
        Field::required(
            "answer",
            Schema::one_of([Schema::string(), Schema::array(Schema::string())]),
        )
        .describe("The correct answer, or an array of correct answers if there are multiple."),
    ])
}

/// Schema of the written-question variant with a mark ceiling.
pub fn written_question_schema(max_marks: i64) -> Schema {
    Schema::object([
        Field::required("question", Schema::string())
            .describe("The open-ended exam-style question."),
        Field::required("marks", Schema::integer_range(1, max_marks))
            .describe("The number of marks the question is worth."),
        Field::required("answer", Schema::string())
            .describe("A concise, ideal answer to the question that can be used for checking."),
    ])
}

/// Schema of the fill-in-the-blanks variant.
pub fn fill_in_the_blanks_schema() -> Schema {
    Schema::object([
        Field::required("sentence", Schema::string())
            .describe("A sentence with a key term replaced by \"______\" (six underscores)."),
        Field::required("answer", Schema::string())
            .describe("The word that was removed from the sentence."),
    ])
}

/// Schema of a single matching pair.
pub fn matching_pair_schema() -> Schema {
    Schema::object([
        Field::required("id", Schema::string())
            .describe("A unique identifier for the pair (e.g., \"item-1\")."),
        Field::required("item", Schema::string())
            .describe("The first part of the pair (e.g., a term, formula, or concept)."),
        Field::required("match", Schema::string()).describe(
            "The corresponding second part of the pair (e.g., a definition, unit, or explanation).",
        ),
    ])
}

/// Schema of the matching-pairs variant.
pub fn matching_pairs_schema() -> Schema {
    Schema::object([Field::required(
        "pairs",
        Schema::array(matching_pair_schema()),
    )])
}

/// The three-way quiz union used inside lessons.
pub fn lesson_quiz_schema(max_marks: i64) -> Schema {
    Schema::union("quizType", [
        ("multiple-choice", multiple_choice_schema()),
        ("written-question", written_question_schema(max_marks)),
        ("fill-in-the-blanks", fill_in_the_blanks_schema()),
    ])
}

/// The four-way quiz union used for practice papers.
pub fn practice_quiz_schema(max_marks: i64) -> Schema {
    Schema::union("quizType", [
        ("multiple-choice", multiple_choice_schema()),
        ("written-question", written_question_schema(max_marks)),
        ("fill-in-the-gaps", fill_in_the_blanks_schema()),
        ("matching-pairs", matching_pairs_schema()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn discriminator_selects_the_variant() {
        let question: QuizQuestion = serde_json::from_value(json!({
            "quizType": "written-question",
            "question": "Explain why the Berlin Wall was built.",
            "marks": 4,
            "answer": "To stop emigration from East to West Berlin."
        }))
        .unwrap();
        assert!(matches!(question, QuizQuestion::Written { marks: 4, .. }));
    }

    #[test]
    fn gaps_alias_decodes_to_blanks_variant() {
        let question: QuizQuestion = serde_json::from_value(json!({
            "quizType": "fill-in-the-gaps",
            "sentence": "Energy is transferred by ______.",
            "answer": "radiation"
        }))
        .unwrap();
        assert!(matches!(question, QuizQuestion::FillInTheBlanks { .. }));

        // Serialization emits the canonical spelling.
        let encoded = serde_json::to_value(&question).unwrap();
        assert_eq!(encoded["quizType"], "fill-in-the-blanks");
    }

    #[test]
    fn answer_key_accepts_single_and_multiple() {
        let single = AnswerKey::One("diffusion".to_string());
        assert!(single.accepts("Diffusion"));
        assert!(!single.accepts("osmosis"));

        let multiple: AnswerKey =
            serde_json::from_value(json!(["mitochondria", "ribosomes"])).unwrap();
        assert!(multiple.accepts("ribosome"));
        assert_eq!(multiple.expected_count(), 2);
    }

    #[test]
    fn matching_pair_uses_the_wire_field_name() {
        let pair: MatchingPair = serde_json::from_value(json!({
            "id": "item-1",
            "item": "Voltage",
            "match": "The potential difference across a component."
        }))
        .unwrap();
        assert_eq!(pair.counterpart, "The potential difference across a component.");
    }

    #[test]
    fn union_schema_validates_each_variant() {
        let schema = practice_quiz_schema(6);
        let gaps = json!({
            "quizType": "fill-in-the-gaps",
            "sentence": "Plants absorb ______ for photosynthesis.",
            "answer": "carbon dioxide"
        });
        assert!(schema.validate(&gaps).is_ok());

        let over_marked = json!({
            "quizType": "written-question",
            "question": "q",
            "marks": 7,
            "answer": "a"
        });
        assert!(schema.validate(&over_marked).is_err());
    }
}
