use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::{ExamAttempt, Question, QuotaPlan},
    repositories::{ExamSessionRepository, QuestionRepository},
    services::selector::PaperSelector,
};

/// Binds one assembled paper to one exam session, exactly once.
pub struct AttemptService {
    selector: PaperSelector,
    sessions: Arc<dyn ExamSessionRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl AttemptService {
    pub fn new(
        selector: PaperSelector,
        sessions: Arc<dyn ExamSessionRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            selector,
            sessions,
            questions,
        }
    }

    /// Idempotent per session: the first call assembles a paper and
    /// persists the binding; every later call (page reloads, retries)
    /// returns that same binding untouched. A concurrent first call is
    /// settled by the unique session index — the loser adopts the
    /// winner's binding.
    pub async fn bind_or_reuse(
        &self,
        session_id: &str,
        account_id: &str,
        plan: &QuotaPlan,
    ) -> AppResult<ExamAttempt> {
        if let Some(existing) = self.sessions.find_by_session(session_id).await? {
            return Ok(existing);
        }

        let paper = self.selector.assemble(plan).await?;
        let attempt = ExamAttempt::bind(session_id, account_id, &paper);
        let (created, attempt) = self.sessions.create_if_absent(attempt).await?;

        if created {
            log::info!(
                "Bound attempt '{}' with {} questions to session",
                attempt.attempt_id,
                attempt.bound_question_ids.len()
            );
        }

        Ok(attempt)
    }

    /// The attempt's questions, in the canonical bound order.
    pub async fn resolve_questions(&self, attempt: &ExamAttempt) -> AppResult<Vec<Question>> {
        let fetched = self
            .questions
            .find_by_ids(&attempt.bound_question_ids)
            .await?;
        attempt.resolve_against(fetched)
    }
}
