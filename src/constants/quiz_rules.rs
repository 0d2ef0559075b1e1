/// Number of difficulty levels in one attempt.
pub const LEVEL_COUNT: usize = 5;

/// Questions available to each level.
pub const QUESTIONS_PER_LEVEL: usize = 5;

/// Wrong answers inside one level that end the attempt immediately.
pub const MAX_WRONG_ANSWERS: u32 = 3;

/// Questions answered before the clear/ambiguous checkpoint is evaluated.
pub const CHECKPOINT_QUESTIONS: u32 = 2;

/// Correct answers that clear a level.
pub const CORRECT_TO_CLEAR: u32 = 2;

/// Wrong answers that put a level into extended attempt.
pub const WRONG_TO_EXTEND: u32 = 2;

/// Questions after which an extended attempt without a clear fails.
pub const EXTENDED_ATTEMPT_QUESTIONS: u32 = 4;

pub const MIN_OPTIONS_PER_QUESTION: usize = 2;

// Chapter weights for the readiness score.
pub const COMPLETED_CHAPTER_WEIGHT: f64 = 100.0;
pub const IN_PROGRESS_WEIGHT_PER_LEVEL: f64 = 20.0;
pub const FAILED_WEIGHT_PER_LEVEL: f64 = 10.0;

pub const EXAM_READY_COMPLETION_PERCENT: f64 = 80.0;
pub const EXAM_READY_SCORE: f64 = 75.0;
