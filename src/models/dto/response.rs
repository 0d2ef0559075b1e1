use serde::Serialize;

use crate::models::domain::ChapterSummary;

/// Correctness feedback shown before the learner continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub selected_option: String,
    pub correct_option: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeEfficiency {
    pub actual_hours: f64,
    pub estimated_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub total_chapters: usize,
    pub completed_chapters: usize,
    pub completion_percentage: f64,
    pub ai_score: f64,
    pub time_efficiency: TimeEfficiency,
    pub exam_ready: bool,
    pub weak_areas: Vec<ChapterSummary>,
    pub strengths: Vec<ChapterSummary>,
}
