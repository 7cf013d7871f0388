use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::ExamResult,
    repositories::is_duplicate_key_error,
};

/// Persistence for finalized results. The unique index on `attempt_id`
/// is what makes scoring exactly-once: under concurrent duplicate
/// submissions exactly one insert wins and every caller converges on
/// that record.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn create_if_absent(&self, result: ExamResult) -> AppResult<(bool, ExamResult)>;
    async fn find_by_attempt_id(
        &self,
        attempt_id: &str,
        account_id: &str,
    ) -> AppResult<Option<ExamResult>>;
    async fn find_by_account(&self, account_id: &str) -> AppResult<Vec<ExamResult>>;
}

pub struct MongoResultRepository {
    collection: Collection<ExamResult>,
}

impl MongoResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("exam_results");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for exam_results collection");

        let attempt_index = IndexModel::builder()
            .keys(doc! { "attempt_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("attempt_id_unique".to_string())
                    .build(),
            )
            .build();

        let account_index = IndexModel::builder()
            .keys(doc! { "account_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("account_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(attempt_index).await?;
        self.collection.create_index(account_index).await?;

        log::info!("Successfully created indexes for exam_results collection");
        Ok(())
    }
}

#[async_trait]
impl ResultRepository for MongoResultRepository {
    async fn create_if_absent(&self, result: ExamResult) -> AppResult<(bool, ExamResult)> {
        match self.collection.insert_one(&result).await {
            Ok(_) => Ok((true, result)),
            Err(err) if is_duplicate_key_error(&err) => {
                let existing = self
                    .find_by_attempt_id(&result.attempt_id, &result.account_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(format!(
                            "duplicate result for attempt '{}' but no record found",
                            result.attempt_id
                        ))
                    })?;
                Ok((false, existing))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_attempt_id(
        &self,
        attempt_id: &str,
        account_id: &str,
    ) -> AppResult<Option<ExamResult>> {
        let result = self
            .collection
            .find_one(doc! { "attempt_id": attempt_id, "account_id": account_id })
            .await?;
        Ok(result)
    }

    async fn find_by_account(&self, account_id: &str) -> AppResult<Vec<ExamResult>> {
        let results = self
            .collection
            .find(doc! { "account_id": account_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }
}
