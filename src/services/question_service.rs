use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Question, dto::request::CreateQuestionRequest},
    repositories::QuestionRepository,
};

/// Admin-side authoring: single questions and bulk imports.
pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn create_question(&self, request: CreateQuestionRequest) -> AppResult<Question> {
        request.validate()?;

        let question = self.questions.insert_one(request.into_question()).await?;
        log::info!(
            "Added question '{}' ({} / {} marks)",
            question.id,
            question.subject.as_str(),
            question.marks
        );
        Ok(question)
    }

    /// Bulk import. The whole payload is validated before anything is
    /// inserted so a bad row cannot leave a half-imported batch behind.
    pub async fn import_questions(
        &self,
        requests: Vec<CreateQuestionRequest>,
    ) -> AppResult<usize> {
        if requests.is_empty() {
            return Err(AppError::ValidationError(
                "Import payload contains no questions".to_string(),
            ));
        }

        for (index, request) in requests.iter().enumerate() {
            request
                .validate()
                .map_err(|err| AppError::ValidationError(format!("question {}: {}", index, err)))?;
        }

        let questions: Vec<Question> = requests
            .into_iter()
            .map(CreateQuestionRequest::into_question)
            .collect();

        let inserted = self.questions.insert_many(questions).await?;
        log::info!("Imported {} questions into the bank", inserted);
        Ok(inserted)
    }
}
