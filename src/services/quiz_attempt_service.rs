use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{AttemptRecord, AttemptResult, ChapterInfo, ChapterSummary};
use crate::models::dto::response::ProgressReport;
use crate::repositories::AttemptResultRepository;
use crate::services::progress_analytics;

/// Hands finished attempts to the result sink and reads history back for
/// progress reporting.
pub struct QuizAttemptService {
    repository: Arc<dyn AttemptResultRepository>,
}

impl QuizAttemptService {
    pub fn new(repository: Arc<dyn AttemptResultRepository>) -> Self {
        Self { repository }
    }

    pub async fn record_result(
        &self,
        user_id: &str,
        result: AttemptResult,
    ) -> AppResult<AttemptRecord> {
        if user_id.trim().is_empty() {
            return Err(AppError::ValidationError("user id must not be empty".to_string()));
        }
        if result.chapter_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "attempt result has no chapter id".to_string(),
            ));
        }

        let previous = self
            .repository
            .count_user_attempts(user_id, &result.chapter_id)
            .await?;
        let attempt_number = i32::try_from(previous + 1).map_err(|_| {
            AppError::InternalError("attempt count does not fit the attempt number".to_string())
        })?;

        let record = self
            .repository
            .create(AttemptRecord::new(user_id, attempt_number, result))
            .await?;

        log::info!(
            "Recorded attempt {} (#{}) for user '{}' in chapter '{}': {}",
            record.id,
            record.attempt_number,
            record.user_id,
            record.chapter_id,
            if record.result.success { "completed" } else { "failed" }
        );

        Ok(record)
    }

    pub async fn get_attempt(&self, id: &str) -> AppResult<AttemptRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))
    }

    /// Summarizes the learner's recorded attempts for `chapter`. History only
    /// holds finished attempts, so the status is never `InProgress`.
    pub async fn chapter_summary(
        &self,
        user_id: &str,
        chapter: &ChapterInfo,
    ) -> AppResult<ChapterSummary> {
        let results: Vec<AttemptResult> = self
            .repository
            .find_by_user_and_chapter(user_id, &chapter.chapter_id)
            .await?
            .into_iter()
            .map(|record| record.result)
            .collect();

        Ok(progress_analytics::summarize_chapter(chapter, &results))
    }

    /// Builds the readiness report over `chapters` from recorded history.
    /// Chapters are reported as not started, completed or failed; this never
    /// reports in-progress chapters, so their partial credit only applies to
    /// summaries passed to `progress_analytics::build_report` directly.
    pub async fn progress_report(
        &self,
        user_id: &str,
        chapters: &[ChapterInfo],
    ) -> AppResult<ProgressReport> {
        let records = self.repository.find_by_user(user_id).await?;

        let summaries: Vec<ChapterSummary> = chapters
            .iter()
            .map(|chapter| {
                let results: Vec<AttemptResult> = records
                    .iter()
                    .filter(|r| r.chapter_id == chapter.chapter_id)
                    .map(|r| r.result.clone())
                    .collect();
                progress_analytics::summarize_chapter(chapter, &results)
            })
            .collect();

        Ok(progress_analytics::build_report(&summaries))
    }
}
