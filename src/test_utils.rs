use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::constants::quiz_rules::{LEVEL_COUNT, QUESTIONS_PER_LEVEL};
use crate::models::domain::{
    AttemptResult, ChapterInfo, ChapterStatus, ChapterSummary, Level, LevelOutcomeCounter,
    Question,
};
use crate::models::dto::request::{LevelQuestionsInput, QuestionBankInput, QuestionInput};
use crate::services::question_bank::{QuestionBankProvider, StaticQuestionBank};

const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];

pub mod fixtures {
    use super::*;

    /// A complete bank whose correct key rotates through A..D.
    pub fn question_bank_input(chapter_id: &str) -> QuestionBankInput {
        let levels = (1..=LEVEL_COUNT)
            .map(|level| LevelQuestionsInput {
                questions: (0..QUESTIONS_PER_LEVEL)
                    .map(|index| {
                        let options: BTreeMap<String, String> = OPTION_KEYS
                            .iter()
                            .map(|key| (key.to_string(), format!("Option {key}")))
                            .collect();
                        QuestionInput {
                            id: format!("l{level}-q{index}"),
                            prompt: format!("Level {level} question {}", index + 1),
                            options,
                            correct_option: OPTION_KEYS[(level + index) % OPTION_KEYS.len()]
                                .to_string(),
                            explanation: format!("Explanation for level {level} question {}", index + 1),
                        }
                    })
                    .collect(),
            })
            .collect();

        QuestionBankInput {
            chapter_id: chapter_id.to_string(),
            levels,
        }
    }

    pub fn test_question_bank() -> StaticQuestionBank {
        StaticQuestionBank::from_input(question_bank_input("test-chapter"))
            .expect("fixture bank should be valid")
    }

    /// Serves only the first `limit` questions of each level.
    pub struct TruncatedQuestionBank {
        inner: StaticQuestionBank,
        limit: usize,
    }

    impl TruncatedQuestionBank {
        pub fn new(inner: StaticQuestionBank, limit: usize) -> Self {
            Self { inner, limit }
        }
    }

    impl QuestionBankProvider for TruncatedQuestionBank {
        fn chapter_id(&self) -> &str {
            self.inner.chapter_id()
        }

        fn question(&self, level: Level, index: usize) -> Option<&Question> {
            if index < self.limit {
                self.inner.question(level, index)
            } else {
                None
            }
        }
    }

    /// Serves questions only for levels up to `last`.
    pub struct LevelCappedQuestionBank {
        inner: StaticQuestionBank,
        last: Level,
    }

    impl LevelCappedQuestionBank {
        pub fn new(inner: StaticQuestionBank, last: Level) -> Self {
            Self { inner, last }
        }
    }

    impl QuestionBankProvider for LevelCappedQuestionBank {
        fn chapter_id(&self) -> &str {
            self.inner.chapter_id()
        }

        fn question(&self, level: Level, index: usize) -> Option<&Question> {
            if level <= self.last {
                self.inner.question(level, index)
            } else {
                None
            }
        }
    }

    pub fn test_attempt_result(
        chapter_id: &str,
        success: bool,
        levels_cleared: u8,
        total_correct: u32,
        elapsed_minutes: i64,
    ) -> AttemptResult {
        let finished_at = Utc::now();
        AttemptResult {
            id: Uuid::new_v4().to_string(),
            chapter_id: chapter_id.to_string(),
            success,
            levels_cleared,
            total_correct,
            total_questions: total_correct + 2,
            elapsed_minutes,
            message: AttemptResult::outcome_message(success, levels_cleared),
            level_counters: vec![LevelOutcomeCounter::default(); LEVEL_COUNT],
            started_at: finished_at - Duration::minutes(elapsed_minutes),
            finished_at,
        }
    }

    pub fn chapter_summary(
        chapter_id: &str,
        status: ChapterStatus,
        levels_cleared: u8,
        correct_answers: u32,
    ) -> ChapterSummary {
        ChapterSummary {
            chapter_id: chapter_id.to_string(),
            title: chapter_id.to_uppercase(),
            status,
            levels_cleared,
            time_spent_minutes: 0,
            estimated_minutes: 60,
            correct_answers,
        }
    }

    pub fn test_chapters() -> Vec<ChapterInfo> {
        ["algebra", "geometry", "statistics"]
            .iter()
            .map(|id| ChapterInfo {
                chapter_id: id.to_string(),
                title: id.to_uppercase(),
                estimated_minutes: 60,
            })
            .collect()
    }
}

pub mod test_helpers {
    use super::*;
    use crate::models::domain::{AttemptSession, SessionState};
    use crate::models::dto::response::AnswerFeedback;
    use crate::services::adaptive_level_engine::AdaptiveLevelEngine;

    /// Submits a correct or a wrong key for the current question.
    pub fn answer(
        engine: &AdaptiveLevelEngine,
        session: &mut AttemptSession,
        correct: bool,
    ) -> AnswerFeedback {
        let question = engine
            .current_question(session)
            .expect("session should have a current question");
        let key = if correct {
            question.correct_option.clone()
        } else {
            question
                .options
                .keys()
                .find(|k| **k != question.correct_option)
                .cloned()
                .expect("question should have a wrong option")
        };
        engine
            .submit_answer(session, &key)
            .expect("submit should succeed")
    }

    /// Answers and continues once per entry, returning the last state.
    pub fn answer_level(
        engine: &AdaptiveLevelEngine,
        session: &mut AttemptSession,
        answers: &[bool],
    ) -> SessionState {
        let mut state = session.state();
        for &correct in answers {
            answer(engine, session, correct);
            state = engine
                .continue_after_explanation(session)
                .expect("continue should succeed");
        }
        state
    }

    pub fn level_of(state: SessionState) -> Option<Level> {
        match state {
            SessionState::InLevel { level, .. } => Some(level),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use validator::Validate;

    #[test]
    fn test_fixture_bank_input_is_valid() {
        let input = question_bank_input("fixture");
        assert!(input.validate().is_ok());
        assert_eq!(input.levels.len(), 5);
    }

    #[test]
    fn test_fixture_attempt_result() {
        let result = test_attempt_result("optics", false, 2, 6, 15);
        assert_eq!(result.chapter_id, "optics");
        assert!(!result.success);
        assert_eq!(result.elapsed_minutes, 15);
    }

    #[test]
    fn test_fixture_chapters() {
        let chapters = test_chapters();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].chapter_id, "algebra");
    }
}
