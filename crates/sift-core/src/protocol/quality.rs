use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::scalar::NonEmptyText;

/// One scored answer, shared by every QA question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QaResponse {
    pub title: NonEmptyText,
    /// May be negative or fractional.
    pub score: f64,
}

impl QaResponse {
    /// A response counts as positive when its score is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.score > 0.0
    }
}

/// Quality-assessment questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QaConfig {
    #[schemars(length(min = 1))]
    pub question: Vec<NonEmptyText>,
    #[schemars(length(min = 1))]
    pub response: Vec<QaResponse>,
    /// Cutoff score for a paper to pass quality assessment.
    pub min_score: f64,
}
