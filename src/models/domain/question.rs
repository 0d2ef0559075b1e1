use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: BTreeMap<String, String>, // option key -> option text
    pub correct_option: String,
    pub explanation: String,
}

impl Question {
    /// Exact key comparison, no case folding.
    pub fn is_correct(&self, selected_option: &str) -> bool {
        self.correct_option == selected_option
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }
}
