use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed,
}

/// Static description of a chapter a learner can attempt.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChapterInfo {
    pub chapter_id: String,
    pub title: String,
    pub estimated_minutes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChapterSummary {
    pub chapter_id: String,
    pub title: String,
    pub status: ChapterStatus,
    pub levels_cleared: u8,
    pub time_spent_minutes: u32,
    pub estimated_minutes: u32,
    pub correct_answers: u32,
}

impl ChapterSummary {
    pub fn not_started(chapter: &ChapterInfo) -> Self {
        ChapterSummary {
            chapter_id: chapter.chapter_id.clone(),
            title: chapter.title.clone(),
            status: ChapterStatus::NotStarted,
            levels_cleared: 0,
            time_spent_minutes: 0,
            estimated_minutes: chapter.estimated_minutes,
            correct_answers: 0,
        }
    }
}
