use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::quiz_rules::{LEVEL_COUNT, QUESTIONS_PER_LEVEL};
use crate::errors::{AppError, AppResult};
use crate::models::domain::level::Level;
use crate::models::domain::level_counter::LevelOutcomeCounter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    InLevel { level: Level, question_index: usize },
    Completed,
    Failed { levels_cleared: u8 },
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::InLevel { .. })
    }
}

/// Scored answer waiting for the caller to continue past its explanation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PendingAnswer {
    pub is_correct: bool,
}

/// Mutable state of one pass through the levels. Owned by a single caller.
///
/// Deserializing checks the counters and state against each other and fails
/// with `AppError::ValidationError` on an inconsistent snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "SessionSnapshot")]
pub struct AttemptSession {
    id: String,
    chapter_id: String,
    state: SessionState,
    counters: [LevelOutcomeCounter; LEVEL_COUNT],
    total_questions_asked: u32,
    pending: Option<PendingAnswer>,
    started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    finished_at: Option<DateTime<Utc>>,
}

/// Unchecked wire form of an [`AttemptSession`].
#[derive(Deserialize)]
struct SessionSnapshot {
    id: String,
    chapter_id: String,
    state: SessionState,
    counters: [LevelOutcomeCounter; LEVEL_COUNT],
    total_questions_asked: u32,
    pending: Option<PendingAnswer>,
    started_at: DateTime<Utc>,
    #[serde(default)]
    finished_at: Option<DateTime<Utc>>,
}

impl TryFrom<SessionSnapshot> for AttemptSession {
    type Error = AppError;

    fn try_from(raw: SessionSnapshot) -> Result<Self, Self::Error> {
        let session = AttemptSession {
            id: raw.id,
            chapter_id: raw.chapter_id,
            state: raw.state,
            counters: raw.counters,
            total_questions_asked: raw.total_questions_asked,
            pending: raw.pending,
            started_at: raw.started_at,
            finished_at: raw.finished_at,
        };
        session.check_invariants()?;
        Ok(session)
    }
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::ValidationError(format!("invalid attempt snapshot: {}", message.into()))
}

impl AttemptSession {
    pub fn new(chapter_id: &str, started_at: DateTime<Utc>) -> Self {
        AttemptSession {
            id: Uuid::new_v4().to_string(),
            chapter_id: chapter_id.to_string(),
            state: SessionState::InLevel {
                level: Level::FIRST,
                question_index: 0,
            },
            counters: [LevelOutcomeCounter::default(); LEVEL_COUNT],
            total_questions_asked: 0,
            pending: None,
            started_at,
            finished_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chapter_id(&self) -> &str {
        &self.chapter_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn counter(&self, level: Level) -> &LevelOutcomeCounter {
        &self.counters[level.index()]
    }

    pub fn counters(&self) -> &[LevelOutcomeCounter] {
        &self.counters
    }

    pub fn total_questions_asked(&self) -> u32 {
        self.total_questions_asked
    }

    pub fn total_correct(&self) -> u32 {
        self.counters.iter().map(|c| c.correct_answers).sum()
    }

    pub fn pending(&self) -> Option<PendingAnswer> {
        self.pending
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    fn check_invariants(&self) -> AppResult<()> {
        let mut asked_total: u32 = 0;
        for (idx, counter) in self.counters.iter().enumerate() {
            if counter.questions_asked as usize > QUESTIONS_PER_LEVEL {
                return Err(invalid(format!(
                    "level {} asked {} questions",
                    idx + 1,
                    counter.questions_asked
                )));
            }
            if counter.correct_answers.checked_add(counter.wrong_answers)
                != Some(counter.questions_asked)
            {
                return Err(invalid(format!(
                    "level {} answers do not add up to questions asked",
                    idx + 1
                )));
            }
            asked_total += counter.questions_asked;
        }
        if asked_total != self.total_questions_asked {
            return Err(invalid("total questions asked does not match the levels"));
        }

        match self.state {
            SessionState::InLevel {
                level,
                question_index,
            } => {
                if question_index >= QUESTIONS_PER_LEVEL {
                    return Err(invalid(format!("question index {} out of range", question_index)));
                }
                if self.finished_at.is_some() {
                    return Err(invalid("unfinished attempt has a finish time"));
                }
                let untouched = self.counters[level.index() + 1..]
                    .iter()
                    .all(|c| *c == LevelOutcomeCounter::default());
                if !untouched {
                    return Err(invalid(format!("levels after {} already have answers", level)));
                }
                if self.pending.is_some() && self.counter(level).questions_asked == 0 {
                    return Err(invalid("pending answer in a level with no answers"));
                }
            }
            SessionState::Completed | SessionState::Failed { .. } => {
                if self.finished_at.is_none() {
                    return Err(invalid("finished attempt has no finish time"));
                }
                if self.pending.is_some() {
                    return Err(invalid("finished attempt has a pending answer"));
                }
                if let SessionState::Failed { levels_cleared } = self.state {
                    if usize::from(levels_cleared) >= LEVEL_COUNT {
                        return Err(invalid("failed attempt cleared every level"));
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn record_answer(&mut self, level: Level, is_correct: bool) {
        self.counters[level.index()].record(is_correct);
        self.total_questions_asked = self.total_questions_asked.saturating_add(1);
        self.pending = Some(PendingAnswer { is_correct });
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingAnswer> {
        self.pending.take()
    }

    pub(crate) fn mark_level_completed(&mut self, level: Level) {
        self.counters[level.index()].mark_completed();
    }

    pub(crate) fn move_to(&mut self, level: Level, question_index: usize) {
        self.state = SessionState::InLevel {
            level,
            question_index,
        };
    }

    pub(crate) fn terminate(&mut self, state: SessionState, finished_at: DateTime<Utc>) {
        debug_assert!(state.is_terminal());
        self.state = state;
        self.pending = None;
        self.finished_at = Some(finished_at);
    }
}
