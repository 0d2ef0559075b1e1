use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::attempt_result::AttemptResult;

/// An `AttemptResult` as stored by the result sink.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptRecord {
    pub id: String,
    pub user_id: String,
    pub chapter_id: String,
    pub attempt_number: i32,
    pub result: AttemptResult,
    pub recorded_at: DateTime<Utc>,
}

impl AttemptRecord {
    pub fn new(user_id: &str, attempt_number: i32, result: AttemptResult) -> Self {
        AttemptRecord {
            id: result.id.clone(),
            user_id: user_id.to_string(),
            chapter_id: result.chapter_id.clone(),
            attempt_number,
            result,
            recorded_at: Utc::now(),
        }
    }
}
