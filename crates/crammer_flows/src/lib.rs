//! Education content generation flows.
//!
//! Each flow is a thin, typed orchestration over the retrying
//! generation client: an input struct, an output struct, a declared
//! output schema, and a prompt. The client owns retry, validation and
//! tool plumbing; the flows own the product contracts.

mod answers;
mod chat;
mod cloze;
mod explain;
mod grade;
mod lesson;
mod matching;
mod practice;
mod quiz;
mod speech;
mod summarize_speak;
mod summary;
mod support;
mod written;

pub use answers::answer_matches;
pub use chat::{ChatInput, ChatMessage, ChatOutput, ChatRole, chat};
pub use cloze::{ClozeQuestion, ClozeTest, ClozeTestInput, generate_cloze_test};
pub use explain::{ExplainQuestionInput, QuestionExplanation, explain_exam_question};
pub use grade::{GradeWrittenAnswerInput, GradedAnswer, grade_written_answer};
pub use lesson::{
    Lesson, LessonInput, LessonSlide, VideoSearchTool, generate_lesson,
    generate_lesson_with_tools, lesson_tools, video_search_spec,
};
pub use matching::{MatchingQuiz, MatchingQuizInput, generate_matching_quiz};
pub use practice::{
    Difficulty, PracticePaper, PracticeQuestionsInput, generate_practice_questions,
};
pub use quiz::{
    AnswerKey, MatchingPair, QuizQuestion, fill_in_the_blanks_schema, lesson_quiz_schema,
    matching_pair_schema, matching_pairs_schema, multiple_choice_schema, practice_quiz_schema,
    written_question_schema,
};
pub use speech::{SPEECH_VOICE, SpeechAudio, SpeechInput, generate_speech};
pub use summarize_speak::{
    MAX_SUMMARY_INPUT_CHARS, SummarizeAndSpeakInput, summarize_and_speak,
};
pub use summary::{
    GlossaryEntry, GlossaryEntryInput, TopicSummary, TopicSummaryInput, generate_glossary_entry,
    provide_topic_summary,
};
pub use written::{WrittenQuestion, WrittenQuestionInput, generate_written_question};
