pub mod adaptive_level_engine;
pub mod progress_analytics;
pub mod question_bank;
pub mod quiz_attempt_service;

pub use adaptive_level_engine::AdaptiveLevelEngine;
pub use question_bank::{QuestionBankProvider, StaticQuestionBank};
pub use quiz_attempt_service::QuizAttemptService;
