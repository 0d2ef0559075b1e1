use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::quiz_rules::LEVEL_COUNT;
use crate::models::domain::level_counter::LevelOutcomeCounter;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptResult {
    pub id: String,
    pub chapter_id: String,
    pub success: bool,
    pub levels_cleared: u8,
    pub total_correct: u32,
    pub total_questions: u32,
    pub elapsed_minutes: i64,
    pub message: String,
    pub level_counters: Vec<LevelOutcomeCounter>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AttemptResult {
    pub fn outcome_message(success: bool, levels_cleared: u8) -> String {
        if success {
            format!(
                "Congratulations! You cleared all {} levels.",
                LEVEL_COUNT
            )
        } else if levels_cleared == 0 {
            "Attempt failed at level 1. Review the material and try again.".to_string()
        } else {
            format!(
                "Attempt failed at level {}. You cleared {} of {} levels.",
                levels_cleared + 1,
                levels_cleared,
                LEVEL_COUNT
            )
        }
    }
}

/// Whole minutes between two instants, rounded half away from zero.
pub fn elapsed_minutes(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> i64 {
    let millis = (finished_at - started_at).num_milliseconds();
    (millis as f64 / 60_000.0).round() as i64
}
