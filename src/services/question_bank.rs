use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use validator::Validate;

use crate::constants::quiz_rules::{LEVEL_COUNT, MIN_OPTIONS_PER_QUESTION, QUESTIONS_PER_LEVEL};
use crate::errors::{AppError, AppResult};
use crate::models::domain::{Level, Question};
use crate::models::dto::request::QuestionBankInput;

/// Supplies the fixed question sequence of every level for one chapter.
pub trait QuestionBankProvider: Send + Sync {
    fn chapter_id(&self) -> &str;

    /// `None` when the level has no question at `index`.
    fn question(&self, level: Level, index: usize) -> Option<&Question>;
}

#[derive(Clone, Debug)]
pub struct StaticQuestionBank {
    chapter_id: String,
    levels: Vec<Vec<Question>>,
}

impl StaticQuestionBank {
    pub fn from_input(input: QuestionBankInput) -> AppResult<Self> {
        input.validate()?;

        if input.levels.len() != LEVEL_COUNT {
            return Err(AppError::ValidationError(format!(
                "question bank must have exactly {} levels, got {}",
                LEVEL_COUNT,
                input.levels.len()
            )));
        }

        let chapter_id = input.chapter_id;
        let mut levels = Vec::with_capacity(LEVEL_COUNT);
        for (level_idx, level_input) in input.levels.into_iter().enumerate() {
            if level_input.questions.len() != QUESTIONS_PER_LEVEL {
                return Err(AppError::ValidationError(format!(
                    "level {} must have exactly {} questions, got {}",
                    level_idx + 1,
                    QUESTIONS_PER_LEVEL,
                    level_input.questions.len()
                )));
            }

            let mut questions = Vec::with_capacity(QUESTIONS_PER_LEVEL);
            for question_input in level_input.questions {
                let question: Question = question_input.into();
                Self::check_question(level_idx + 1, &question)?;
                questions.push(question);
            }
            levels.push(questions);
        }

        log::debug!("Loaded question bank for chapter '{}'", chapter_id);

        Ok(Self { chapter_id, levels })
    }

    pub fn from_json(json: &str) -> AppResult<Self> {
        let input: QuestionBankInput = serde_json::from_str(json)?;
        Self::from_input(input)
    }

    pub fn load_json(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::NotFound(format!(
                "could not read question bank '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Reorders questions inside each level. Level membership is unchanged.
    pub fn shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        for questions in &mut self.levels {
            questions.shuffle(rng);
        }
        self
    }

    pub fn level_questions(&self, level: Level) -> &[Question] {
        &self.levels[level.index()]
    }

    fn check_question(level: usize, question: &Question) -> AppResult<()> {
        if question.options.len() < MIN_OPTIONS_PER_QUESTION {
            return Err(AppError::ValidationError(format!(
                "question '{}' in level {} needs at least {} options",
                question.id, level, MIN_OPTIONS_PER_QUESTION
            )));
        }
        if !question.has_option(&question.correct_option) {
            return Err(AppError::ValidationError(format!(
                "question '{}' in level {} marks unknown option '{}' as correct",
                question.id, level, question.correct_option
            )));
        }
        Ok(())
    }
}

impl QuestionBankProvider for StaticQuestionBank {
    fn chapter_id(&self) -> &str {
        &self.chapter_id
    }

    fn question(&self, level: Level, index: usize) -> Option<&Question> {
        self.levels.get(level.index()).and_then(|q| q.get(index))
    }
}
