use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::ExamAttempt,
    repositories::is_duplicate_key_error,
};

/// Per-session storage for the in-progress exam binding. One session
/// carries at most one attempt; rebinding is forbidden.
#[async_trait]
pub trait ExamSessionRepository: Send + Sync {
    /// Atomic bind: insert the attempt unless the session already has
    /// one, in which case the existing binding is returned. The bool
    /// reports whether this call created the record.
    async fn create_if_absent(&self, attempt: ExamAttempt) -> AppResult<(bool, ExamAttempt)>;
    async fn find_by_session(&self, session_id: &str) -> AppResult<Option<ExamAttempt>>;
    async fn mark_finalized(&self, attempt_id: &str) -> AppResult<()>;
}

pub struct MongoExamSessionRepository {
    collection: Collection<ExamAttempt>,
}

impl MongoExamSessionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("exam_sessions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for exam_sessions collection");

        let session_index = IndexModel::builder()
            .keys(doc! { "session_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("session_id_unique".to_string())
                    .build(),
            )
            .build();

        let attempt_index = IndexModel::builder()
            .keys(doc! { "attempt_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("attempt_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(session_index).await?;
        self.collection.create_index(attempt_index).await?;

        log::info!("Successfully created indexes for exam_sessions collection");
        Ok(())
    }
}

#[async_trait]
impl ExamSessionRepository for MongoExamSessionRepository {
    async fn create_if_absent(&self, attempt: ExamAttempt) -> AppResult<(bool, ExamAttempt)> {
        match self.collection.insert_one(&attempt).await {
            Ok(_) => Ok((true, attempt)),
            Err(err) if is_duplicate_key_error(&err) => {
                // Lost the race; hand back whichever binding won.
                let existing = self
                    .find_by_session(&attempt.session_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(format!(
                            "binding conflict for session '{}' but no record found",
                            attempt.session_id
                        ))
                    })?;
                Ok((false, existing))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_session(&self, session_id: &str) -> AppResult<Option<ExamAttempt>> {
        let attempt = self
            .collection
            .find_one(doc! { "session_id": session_id })
            .await?;
        Ok(attempt)
    }

    async fn mark_finalized(&self, attempt_id: &str) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "attempt_id": attempt_id },
                doc! { "$set": { "finalized": true } },
            )
            .await?;
        Ok(())
    }
}
