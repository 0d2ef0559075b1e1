use std::env;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub mongo_max_pool_size: u32,
    pub mongo_timeout_secs: u64,
    pub attempt_results_collection: String,
    pub question_bank_path: String,
    pub persist_results: bool,
    pub learner_id: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "exam-prep-local".to_string()),
            mongo_max_pool_size: env::var("MONGO_MAX_POOL_SIZE")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(4),
            mongo_timeout_secs: env::var("MONGO_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(5),
            attempt_results_collection: env::var("ATTEMPT_RESULTS_COLLECTION")
                .unwrap_or_else(|_| "attempt_results".to_string()),
            question_bank_path: env::var("QUESTION_BANK_PATH")
                .unwrap_or_else(|_| "question_bank.json".to_string()),
            persist_results: env::var("PERSIST_RESULTS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),
            learner_id: env::var("LEARNER_ID").unwrap_or_else(|_| "local-learner".to_string()),
        }
    }

    /// Rejects configurations the runner cannot start with.
    pub fn validate(&self) -> AppResult<()> {
        if self.question_bank_path.trim().is_empty() {
            return Err(AppError::ValidationError(
                "QUESTION_BANK_PATH must not be empty".to_string(),
            ));
        }
        if self.learner_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "LEARNER_ID must not be empty".to_string(),
            ));
        }
        if self.persist_results && self.mongo_max_pool_size == 0 {
            return Err(AppError::ValidationError(
                "MONGO_MAX_POOL_SIZE must be at least 1".to_string(),
            ));
        }
        if self.persist_results && self.attempt_results_collection.trim().is_empty() {
            return Err(AppError::ValidationError(
                "ATTEMPT_RESULTS_COLLECTION must be set when PERSIST_RESULTS is enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "exam-prep-test".to_string(),
            mongo_max_pool_size: 2,
            mongo_timeout_secs: 1,
            attempt_results_collection: "attempt_results".to_string(),
            question_bank_path: "tests/fixtures/question_bank.json".to_string(),
            persist_results: false,
            learner_id: "test-learner".to_string(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
