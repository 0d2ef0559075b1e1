use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Question;

/// Question bank file contents, one entry per level in ascending order.
/// Level and question counts are checked by `StaticQuestionBank::from_input`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuestionBankInput {
    #[validate(length(min = 1, max = 100))]
    pub chapter_id: String,

    #[validate(nested)]
    pub levels: Vec<LevelQuestionsInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LevelQuestionsInput {
    #[validate(nested)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuestionInput {
    #[validate(length(min = 1, max = 100))]
    pub id: String,

    #[validate(length(min = 1))]
    pub prompt: String,

    pub options: BTreeMap<String, String>,

    #[validate(length(min = 1))]
    pub correct_option: String,

    #[serde(default)]
    pub explanation: String,
}

impl From<QuestionInput> for Question {
    fn from(input: QuestionInput) -> Self {
        Question {
            id: input.id,
            prompt: input.prompt,
            options: input.options,
            correct_option: input.correct_option,
            explanation: input.explanation,
        }
    }
}
