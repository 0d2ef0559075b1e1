use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::constants::quiz_rules::{
    CHECKPOINT_QUESTIONS, CORRECT_TO_CLEAR, EXTENDED_ATTEMPT_QUESTIONS, MAX_WRONG_ANSWERS,
    QUESTIONS_PER_LEVEL, WRONG_TO_EXTEND,
};
use crate::errors::{AppError, AppResult};
use crate::models::domain::attempt_result::elapsed_minutes;
use crate::models::domain::{AttemptResult, AttemptSession, Level, Question, SessionState};
use crate::models::dto::response::AnswerFeedback;
use crate::services::question_bank::QuestionBankProvider;

/// Outcome of the advancement policy for the level currently in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelDecision {
    NextQuestion,
    ClearLevel,
    Fail,
}

/// Drives attempt sessions through the levels of one question bank.
///
/// Each answer goes through two calls: [`submit_answer`](Self::submit_answer)
/// scores it and returns feedback, then
/// [`continue_after_explanation`](Self::continue_after_explanation) applies the
/// advancement policy and moves the session on.
pub struct AdaptiveLevelEngine {
    bank: Arc<dyn QuestionBankProvider>,
}

impl AdaptiveLevelEngine {
    pub fn new(bank: Arc<dyn QuestionBankProvider>) -> Self {
        Self { bank }
    }

    pub fn chapter_id(&self) -> &str {
        self.bank.chapter_id()
    }

    pub fn create_session(&self) -> AttemptSession {
        self.create_session_at(Utc::now())
    }

    pub fn create_session_at(&self, started_at: DateTime<Utc>) -> AttemptSession {
        let session = AttemptSession::new(self.bank.chapter_id(), started_at);
        log::info!(
            "Started attempt {} for chapter '{}'",
            session.id(),
            session.chapter_id()
        );
        session
    }

    pub fn current_question(&self, session: &AttemptSession) -> AppResult<&Question> {
        let (level, question_index) = Self::position(session)?;
        self.bank.question(level, question_index).ok_or_else(|| {
            AppError::NotFound(format!(
                "no question {} in level {} of chapter '{}'",
                question_index + 1,
                level,
                self.bank.chapter_id()
            ))
        })
    }

    /// Scores `selected_option` against the current question. Level and
    /// question pointers stay where they are until the caller continues.
    pub fn submit_answer(
        &self,
        session: &mut AttemptSession,
        selected_option: &str,
    ) -> AppResult<AnswerFeedback> {
        let (level, _) = Self::position(session)?;
        if session.pending().is_some() {
            return Err(AppError::ProtocolViolation(
                "an answer is already awaiting continuation".to_string(),
            ));
        }

        let question = self.current_question(session)?;
        let is_correct = question.is_correct(selected_option);
        let feedback = AnswerFeedback {
            is_correct,
            selected_option: selected_option.to_string(),
            correct_option: question.correct_option.clone(),
            explanation: question.explanation.clone(),
        };

        session.record_answer(level, is_correct);

        log::debug!(
            "Attempt {} level {}: answer {} ({})",
            session.id(),
            level,
            selected_option,
            if is_correct { "correct" } else { "wrong" }
        );

        Ok(feedback)
    }

    /// Applies the advancement policy to the scored answer and returns the
    /// resulting session state.
    pub fn continue_after_explanation(
        &self,
        session: &mut AttemptSession,
    ) -> AppResult<SessionState> {
        let (level, question_index) = Self::position(session)?;
        let pending = session.take_pending().ok_or_else(|| {
            AppError::ProtocolViolation("no submitted answer to continue from".to_string())
        })?;
        log::debug!(
            "Attempt {} continuing after a {} answer in level {}",
            session.id(),
            if pending.is_correct { "correct" } else { "wrong" },
            level
        );

        match Self::evaluate_level(session, level) {
            LevelDecision::Fail => self.fail(session, level),
            LevelDecision::ClearLevel => self.clear_level(session, level),
            LevelDecision::NextQuestion => self.next_question(session, level, question_index),
        }

        Ok(session.state())
    }

    pub fn get_result(&self, session: &AttemptSession) -> AppResult<AttemptResult> {
        let (success, levels_cleared) = match session.state() {
            SessionState::Completed => (true, Level::LAST.number()),
            SessionState::Failed { levels_cleared } => (false, levels_cleared),
            SessionState::InLevel { .. } => {
                return Err(AppError::ProtocolViolation(
                    "attempt has not finished yet".to_string(),
                ))
            }
        };
        let finished_at = session.finished_at().ok_or_else(|| {
            AppError::InternalError("finished attempt has no finish time".to_string())
        })?;

        Ok(AttemptResult {
            id: session.id().to_string(),
            chapter_id: session.chapter_id().to_string(),
            success,
            levels_cleared,
            total_correct: session.total_correct(),
            total_questions: session.total_questions_asked(),
            elapsed_minutes: elapsed_minutes(session.started_at(), finished_at),
            message: AttemptResult::outcome_message(success, levels_cleared),
            level_counters: session.counters().to_vec(),
            started_at: session.started_at(),
            finished_at,
        })
    }

    fn position(session: &AttemptSession) -> AppResult<(Level, usize)> {
        match session.state() {
            SessionState::InLevel {
                level,
                question_index,
            } => Ok((level, question_index)),
            _ => Err(AppError::ProtocolViolation(
                "attempt has already finished".to_string(),
            )),
        }
    }

    fn evaluate_level(session: &AttemptSession, level: Level) -> LevelDecision {
        let counter = session.counter(level);

        if counter.wrong_answers >= MAX_WRONG_ANSWERS {
            return LevelDecision::Fail;
        }

        if counter.questions_asked >= CHECKPOINT_QUESTIONS {
            if counter.correct_answers == CORRECT_TO_CLEAR {
                return LevelDecision::ClearLevel;
            }
            if counter.wrong_answers == WRONG_TO_EXTEND
                && counter.questions_asked >= EXTENDED_ATTEMPT_QUESTIONS
            {
                return LevelDecision::Fail;
            }
        }

        LevelDecision::NextQuestion
    }

    fn next_question(&self, session: &mut AttemptSession, level: Level, question_index: usize) {
        let next_index = question_index + 1;
        if next_index >= QUESTIONS_PER_LEVEL || self.bank.question(level, next_index).is_none() {
            log::warn!(
                "Attempt {} ran out of questions in level {} without a decision",
                session.id(),
                level
            );
            self.fail(session, level);
            return;
        }
        session.move_to(level, next_index);
    }

    fn clear_level(&self, session: &mut AttemptSession, level: Level) {
        session.mark_level_completed(level);
        match level.next() {
            Some(next) => {
                log::info!("Attempt {} cleared level {}", session.id(), level);
                if self.bank.question(next, 0).is_none() {
                    log::warn!(
                        "Attempt {} has no questions for level {} in chapter '{}'",
                        session.id(),
                        next,
                        self.bank.chapter_id()
                    );
                    self.fail(session, next);
                    return;
                }
                session.move_to(next, 0);
            }
            None => {
                session.terminate(SessionState::Completed, Utc::now());
                log::info!("Attempt {} completed all levels", session.id());
            }
        }
    }

    fn fail(&self, session: &mut AttemptSession, level: Level) {
        let levels_cleared = level.cleared_before();
        session.terminate(SessionState::Failed { levels_cleared }, Utc::now());
        log::info!(
            "Attempt {} failed in level {} with {} levels cleared",
            session.id(),
            level,
            levels_cleared
        );
    }
}
