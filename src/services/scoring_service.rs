use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ExamAttempt, ExamResult, OutcomeTag, Question, QuestionOutcome},
    repositories::{ExamSessionRepository, QuestionRepository, ResultRepository},
};

/// Scores a session's bound attempt and persists the result exactly
/// once.
pub struct ScoringService {
    sessions: Arc<dyn ExamSessionRepository>,
    questions: Arc<dyn QuestionRepository>,
    results: Arc<dyn ResultRepository>,
}

impl ScoringService {
    pub fn new(
        sessions: Arc<dyn ExamSessionRepository>,
        questions: Arc<dyn QuestionRepository>,
        results: Arc<dyn ResultRepository>,
    ) -> Self {
        Self {
            sessions,
            questions,
            results,
        }
    }

    /// Grade `submitted` against the session's bound question set.
    /// Answers are index-aligned with the paper as shown; entries past
    /// the end of `submitted` count as unanswered. A resubmission for
    /// an already-scored attempt returns the stored result untouched,
    /// whatever answers it carries.
    pub async fn score(
        &self,
        session_id: &str,
        account_id: &str,
        submitted: &[Option<u32>],
    ) -> AppResult<ExamResult> {
        let attempt = self
            .sessions
            .find_by_session(session_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No exam paper has been issued for this session".to_string())
            })?;

        if attempt.account_id != account_id {
            return Err(AppError::Unauthorized(
                "Attempt belongs to a different account".to_string(),
            ));
        }

        if let Some(existing) = self
            .results
            .find_by_attempt_id(&attempt.attempt_id, account_id)
            .await?
        {
            log::info!(
                "Attempt '{}' already scored, returning stored result",
                attempt.attempt_id
            );
            return Ok(existing);
        }

        let fetched = self
            .questions
            .find_by_ids(&attempt.bound_question_ids)
            .await?;
        let bound = attempt.resolve_against(fetched)?;

        let result = grade(&attempt, &bound, submitted);
        let (created, result) = self.results.create_if_absent(result).await?;

        if created {
            // The unique attempt_id index is the exactly-once
            // guarantee; the session flag is bookkeeping and must not
            // fail a submission whose result is already stored.
            if let Err(err) = self.sessions.mark_finalized(&attempt.attempt_id).await {
                log::error!(
                    "Failed to mark attempt '{}' finalized: {}",
                    attempt.attempt_id,
                    err
                );
            }
            log::info!(
                "Scored attempt '{}': {} / {}",
                result.attempt_id,
                result.total_awarded,
                result.total_possible
            );
        }

        Ok(result)
    }

    /// All results for an account, newest first.
    pub async fn history(&self, account_id: &str) -> AppResult<Vec<ExamResult>> {
        self.results.find_by_account(account_id).await
    }

    /// One result, scoped to the owning account.
    pub async fn result_for(&self, attempt_id: &str, account_id: &str) -> AppResult<ExamResult> {
        self.results
            .find_by_attempt_id(attempt_id, account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No result for attempt '{}'", attempt_id)))
    }
}

fn grade(attempt: &ExamAttempt, questions: &[Question], submitted: &[Option<u32>]) -> ExamResult {
    let mut answers = Vec::with_capacity(questions.len());
    let mut outcomes = Vec::with_capacity(questions.len());
    let mut total_awarded = 0.0;
    let mut total_possible = 0.0;

    for (index, question) in questions.iter().enumerate() {
        let answer = submitted.get(index).copied().flatten();
        let (awarded, tag) = match answer {
            None => (0.0, OutcomeTag::Unanswered),
            Some(option) if option == question.correct_option => {
                (round2(question.marks), OutcomeTag::Correct)
            }
            Some(_) => (round2(-question.negative_marks), OutcomeTag::Incorrect),
        };

        total_awarded += awarded;
        total_possible += question.marks;
        answers.push(answer);
        outcomes.push(QuestionOutcome {
            question_id: question.id.clone(),
            awarded,
            tag,
        });
    }

    ExamResult {
        attempt_id: attempt.attempt_id.clone(),
        account_id: attempt.account_id.clone(),
        answers,
        outcomes,
        // Terms were rounded individually; the sum is rounded again.
        total_awarded: round2(total_awarded),
        total_possible,
        created_at: Utc::now(),
    }
}

/// Round to 2 decimal places, halves away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
