//! Aggregate metrics over per-chapter attempt summaries.
//!
//! Everything here is a pure function of its input slice.

use crate::constants::quiz_rules::{
    COMPLETED_CHAPTER_WEIGHT, EXAM_READY_COMPLETION_PERCENT, EXAM_READY_SCORE,
    FAILED_WEIGHT_PER_LEVEL, IN_PROGRESS_WEIGHT_PER_LEVEL, LEVEL_COUNT,
};
use crate::models::domain::{AttemptResult, ChapterInfo, ChapterStatus, ChapterSummary};
use crate::models::dto::response::{ProgressReport, TimeEfficiency};

pub fn completed_count(summaries: &[ChapterSummary]) -> usize {
    summaries
        .iter()
        .filter(|s| s.status == ChapterStatus::Completed)
        .count()
}

pub fn completion_percentage(summaries: &[ChapterSummary]) -> f64 {
    if summaries.is_empty() {
        return 0.0;
    }
    completed_count(summaries) as f64 * 100.0 / summaries.len() as f64
}

fn chapter_weight(summary: &ChapterSummary) -> f64 {
    let levels = f64::from(summary.levels_cleared);
    match summary.status {
        ChapterStatus::Completed => COMPLETED_CHAPTER_WEIGHT,
        ChapterStatus::InProgress => IN_PROGRESS_WEIGHT_PER_LEVEL * levels,
        ChapterStatus::Failed => FAILED_WEIGHT_PER_LEVEL * levels,
        ChapterStatus::NotStarted => 0.0,
    }
}

/// Weighted readiness score averaged over every chapter, started or not.
pub fn ai_score(summaries: &[ChapterSummary]) -> f64 {
    if summaries.is_empty() {
        return 0.0;
    }
    let total: f64 = summaries.iter().map(chapter_weight).sum();
    total / summaries.len() as f64
}

pub fn time_efficiency(summaries: &[ChapterSummary]) -> TimeEfficiency {
    let actual_minutes: u64 = summaries
        .iter()
        .map(|s| u64::from(s.time_spent_minutes))
        .sum();
    let estimated_minutes: u64 = summaries
        .iter()
        .map(|s| u64::from(s.estimated_minutes))
        .sum();

    let actual_hours = actual_minutes as f64 / 60.0;
    let estimated_hours = estimated_minutes as f64 / 60.0;
    let efficiency_percent = if actual_minutes == 0 {
        None
    } else {
        Some(estimated_hours / actual_hours * 100.0)
    };

    TimeEfficiency {
        actual_hours,
        estimated_hours,
        efficiency_percent,
    }
}

pub fn is_exam_ready(completion_percentage: f64, ai_score: f64) -> bool {
    completion_percentage >= EXAM_READY_COMPLETION_PERCENT && ai_score >= EXAM_READY_SCORE
}

pub fn exam_ready(summaries: &[ChapterSummary]) -> bool {
    is_exam_ready(completion_percentage(summaries), ai_score(summaries))
}

/// Failed and in-progress chapters, fewest levels cleared first.
pub fn weak_areas(summaries: &[ChapterSummary]) -> Vec<&ChapterSummary> {
    let mut weak: Vec<&ChapterSummary> = summaries
        .iter()
        .filter(|s| matches!(s.status, ChapterStatus::Failed | ChapterStatus::InProgress))
        .collect();
    weak.sort_by_key(|s| s.levels_cleared);
    weak
}

/// Completed chapters, most correct answers first.
pub fn strengths(summaries: &[ChapterSummary]) -> Vec<&ChapterSummary> {
    let mut strong: Vec<&ChapterSummary> = summaries
        .iter()
        .filter(|s| s.status == ChapterStatus::Completed)
        .collect();
    strong.sort_by(|a, b| b.correct_answers.cmp(&a.correct_answers));
    strong
}

pub fn build_report(summaries: &[ChapterSummary]) -> ProgressReport {
    let completion = completion_percentage(summaries);
    let score = ai_score(summaries);

    ProgressReport {
        total_chapters: summaries.len(),
        completed_chapters: completed_count(summaries),
        completion_percentage: completion,
        ai_score: score,
        time_efficiency: time_efficiency(summaries),
        exam_ready: is_exam_ready(completion, score),
        weak_areas: weak_areas(summaries).into_iter().cloned().collect(),
        strengths: strengths(summaries).into_iter().cloned().collect(),
    }
}

/// Folds a chapter's recorded attempts into one summary.
///
/// Any successful attempt makes the chapter completed and reports the best
/// correct-answer count among successes. Otherwise the chapter is failed
/// with the most levels any attempt cleared. Never yields `InProgress`.
pub fn summarize_chapter(chapter: &ChapterInfo, results: &[AttemptResult]) -> ChapterSummary {
    let mut summary = ChapterSummary::not_started(chapter);
    if results.is_empty() {
        return summary;
    }

    summary.time_spent_minutes = results
        .iter()
        .map(|r| u32::try_from(r.elapsed_minutes.max(0)).unwrap_or(u32::MAX))
        .fold(0u32, u32::saturating_add);

    let best_success = results
        .iter()
        .filter(|r| r.success)
        .map(|r| r.total_correct)
        .max();

    match best_success {
        Some(correct) => {
            summary.status = ChapterStatus::Completed;
            summary.levels_cleared = LEVEL_COUNT as u8;
            summary.correct_answers = correct;
        }
        None => {
            summary.status = ChapterStatus::Failed;
            summary.levels_cleared = results.iter().map(|r| r.levels_cleared).max().unwrap_or(0);
            summary.correct_answers = results.iter().map(|r| r.total_correct).max().unwrap_or(0);
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{chapter_summary, test_attempt_result};

    fn sample_summaries() -> Vec<ChapterSummary> {
        vec![
            chapter_summary("algebra", ChapterStatus::Completed, 5, 14),
            chapter_summary("geometry", ChapterStatus::InProgress, 2, 6),
            chapter_summary("calculus", ChapterStatus::Failed, 3, 7),
            chapter_summary("statistics", ChapterStatus::NotStarted, 0, 0),
            chapter_summary("trigonometry", ChapterStatus::Completed, 5, 11),
        ]
    }

    #[test]
    fn completion_percentage_counts_completed_chapters() {
        assert_eq!(completion_percentage(&sample_summaries()), 40.0);
        assert_eq!(completion_percentage(&[]), 0.0);
    }

    #[test]
    fn ai_score_applies_status_weights() {
        // (100 + 20*2 + 10*3 + 0 + 100) / 5
        assert_eq!(ai_score(&sample_summaries()), 54.0);
        assert_eq!(ai_score(&[]), 0.0);
    }

    #[test]
    fn exam_ready_needs_both_thresholds() {
        assert!(is_exam_ready(80.0, 75.0));
        assert!(!is_exam_ready(79.9, 100.0));
        assert!(!is_exam_ready(100.0, 74.9));
        assert!(!exam_ready(&sample_summaries()));

        let all_done: Vec<ChapterSummary> = (0..5)
            .map(|i| chapter_summary(&format!("c{i}"), ChapterStatus::Completed, 5, 10))
            .collect();
        assert!(exam_ready(&all_done));
    }

    #[test]
    fn time_efficiency_compares_estimate_to_actual() {
        let mut summaries = sample_summaries();
        for s in &mut summaries {
            s.estimated_minutes = 60;
            s.time_spent_minutes = 0;
        }
        summaries[0].time_spent_minutes = 120;
        summaries[1].time_spent_minutes = 30;
        summaries[2].time_spent_minutes = 90;

        let efficiency = time_efficiency(&summaries);
        assert_eq!(efficiency.actual_hours, 4.0);
        assert_eq!(efficiency.estimated_hours, 5.0);
        assert_eq!(efficiency.efficiency_percent, Some(125.0));
    }

    #[test]
    fn time_efficiency_without_time_spent_has_no_ratio() {
        let summaries = vec![chapter_summary("a", ChapterStatus::NotStarted, 0, 0)];
        assert_eq!(time_efficiency(&summaries).efficiency_percent, None);
    }

    #[test]
    fn weak_areas_rank_by_fewest_levels_cleared() {
        let summaries = sample_summaries();
        let weak: Vec<&str> = weak_areas(&summaries)
            .iter()
            .map(|s| s.chapter_id.as_str())
            .collect();

        assert_eq!(weak, vec!["geometry", "calculus"]);
    }

    #[test]
    fn strengths_rank_by_most_correct_answers() {
        let summaries = sample_summaries();
        let strong: Vec<&str> = strengths(&summaries)
            .iter()
            .map(|s| s.chapter_id.as_str())
            .collect();

        assert_eq!(strong, vec!["algebra", "trigonometry"]);
    }

    #[test]
    fn build_report_bundles_metrics() {
        let report = build_report(&sample_summaries());

        assert_eq!(report.total_chapters, 5);
        assert_eq!(report.completed_chapters, 2);
        assert_eq!(report.completion_percentage, 40.0);
        assert_eq!(report.ai_score, 54.0);
        assert!(!report.exam_ready);
        assert_eq!(report.weak_areas.len(), 2);
        assert_eq!(report.strengths[0].chapter_id, "algebra");
    }

    #[test]
    fn summarize_chapter_without_attempts_is_not_started() {
        let chapter = ChapterInfo {
            chapter_id: "optics".to_string(),
            title: "Optics".to_string(),
            estimated_minutes: 45,
        };

        let summary = summarize_chapter(&chapter, &[]);
        assert_eq!(summary.status, ChapterStatus::NotStarted);
        assert_eq!(summary.estimated_minutes, 45);
    }

    #[test]
    fn summarize_chapter_prefers_successful_attempts() {
        let chapter = ChapterInfo {
            chapter_id: "optics".to_string(),
            title: "Optics".to_string(),
            estimated_minutes: 45,
        };
        let results = vec![
            test_attempt_result("optics", false, 3, 8, 20),
            test_attempt_result("optics", true, 5, 12, 25),
            test_attempt_result("optics", true, 5, 10, 15),
        ];

        let summary = summarize_chapter(&chapter, &results);
        assert_eq!(summary.status, ChapterStatus::Completed);
        assert_eq!(summary.levels_cleared, 5);
        assert_eq!(summary.correct_answers, 12);
        assert_eq!(summary.time_spent_minutes, 60);
    }

    #[test]
    fn summarize_chapter_failures_keep_best_progress() {
        let chapter = ChapterInfo {
            chapter_id: "optics".to_string(),
            title: "Optics".to_string(),
            estimated_minutes: 45,
        };
        let results = vec![
            test_attempt_result("optics", false, 1, 3, 5),
            test_attempt_result("optics", false, 3, 7, 9),
        ];

        let summary = summarize_chapter(&chapter, &results);
        assert_eq!(summary.status, ChapterStatus::Failed);
        assert_eq!(summary.levels_cleared, 3);
        assert_eq!(summary.correct_answers, 7);
        assert_eq!(summary.time_spent_minutes, 14);
    }
}
