use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{ExamResult, Question, QuestionOutcome, Subject, UserRole};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

/// A question as presented to the candidate: the answer key stays on
/// the server.
#[derive(Debug, Clone, Serialize)]
pub struct PaperQuestionDto {
    pub id: String,
    pub subject: Subject,
    pub text: String,
    pub options: Vec<String>,
    pub marks: f64,
    pub negative_marks: f64,
}

impl From<Question> for PaperQuestionDto {
    fn from(question: Question) -> Self {
        PaperQuestionDto {
            id: question.id,
            subject: question.subject,
            text: question.text,
            options: question.options,
            marks: question.marks,
            negative_marks: question.negative_marks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaperResponse {
    pub attempt_id: String,
    pub total_possible: f64,
    pub questions: Vec<PaperQuestionDto>,
}

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub attempt_id: String,
    pub answers: Vec<Option<u32>>,
    pub outcomes: Vec<QuestionOutcome>,
    pub total_awarded: f64,
    pub total_possible: f64,
    pub created_at: DateTime<Utc>,
}

impl From<ExamResult> for ResultResponse {
    fn from(result: ExamResult) -> Self {
        ResultResponse {
            attempt_id: result.attempt_id,
            answers: result.answers,
            outcomes: result.outcomes,
            total_awarded: result.total_awarded,
            total_possible: result.total_possible,
            created_at: result.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResultSummaryDto {
    pub attempt_id: String,
    pub total_awarded: f64,
    pub total_possible: f64,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<ExamResult> for ResultSummaryDto {
    fn from(result: ExamResult) -> Self {
        ResultSummaryDto {
            attempt_id: result.attempt_id,
            total_awarded: result.total_awarded,
            total_possible: result.total_possible,
            question_count: result.outcomes.len(),
            created_at: result.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub inserted: usize,
}
