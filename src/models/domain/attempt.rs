use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::question::Question,
};

pub const ATTEMPT_ID_PREFIX: &str = "EXAM-";
const ATTEMPT_ID_SUFFIX_LEN: usize = 10;

/// One exam session's binding: the attempt identity and the exact
/// ordered question set the user was shown. `bound_question_ids` is
/// fixed at creation and never recomputed, so scoring always runs
/// against the paper as presented even if the bank changes underneath.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExamAttempt {
    pub attempt_id: String,
    pub session_id: String,
    pub account_id: String,
    pub bound_question_ids: Vec<String>,
    pub finalized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ExamAttempt {
    pub fn bind(session_id: &str, account_id: &str, paper: &[Question]) -> Self {
        ExamAttempt {
            attempt_id: Self::mint_attempt_id(),
            session_id: session_id.to_string(),
            account_id: account_id.to_string(),
            bound_question_ids: paper.iter().map(|q| q.id.clone()).collect(),
            finalized: false,
            created_at: Some(Utc::now()),
        }
    }

    /// 10 alphanumeric characters behind a namespacing prefix. The id
    /// space is 62^10; a collision is accepted as negligible and is not
    /// probed for — the unique index on `attempt_id` surfaces one as a
    /// storage error instead of silent reuse.
    pub fn mint_attempt_id() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ATTEMPT_ID_SUFFIX_LEN)
            .map(char::from)
            .collect();
        format!("{}{}", ATTEMPT_ID_PREFIX, suffix)
    }

    /// Reorder a bank fetch back into bound order. Every bound id must
    /// resolve; a question deleted after binding poisons the attempt.
    pub fn resolve_against(&self, fetched: Vec<Question>) -> AppResult<Vec<Question>> {
        let mut by_id: HashMap<String, Question> =
            fetched.into_iter().map(|q| (q.id.clone(), q)).collect();

        self.bound_question_ids
            .iter()
            .map(|id| {
                by_id.remove(id).ok_or_else(|| {
                    AppError::InconsistentBinding(format!(
                        "question '{}' bound to attempt '{}' is no longer in the bank",
                        id, self.attempt_id
                    ))
                })
            })
            .collect()
    }
}
