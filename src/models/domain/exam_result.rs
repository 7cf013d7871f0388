use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final, immutable record of one scored attempt. `answers` and
/// `outcomes` are index-aligned with the attempt's bound question ids.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ExamResult {
    pub attempt_id: String,
    pub account_id: String,
    pub answers: Vec<Option<u32>>,
    pub outcomes: Vec<QuestionOutcome>,
    pub total_awarded: f64,
    pub total_possible: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub awarded: f64,
    pub tag: OutcomeTag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum OutcomeTag {
    Correct,
    Incorrect,
    Unanswered,
}
