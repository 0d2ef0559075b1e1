use serde::{Deserialize, Serialize};

/// Per-level tally. `questions_asked == correct_answers + wrong_answers` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LevelOutcomeCounter {
    pub questions_asked: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub completed: bool,
}

impl LevelOutcomeCounter {
    pub fn record(&mut self, is_correct: bool) {
        self.questions_asked = self.questions_asked.saturating_add(1);
        if is_correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
        } else {
            self.wrong_answers = self.wrong_answers.saturating_add(1);
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}
