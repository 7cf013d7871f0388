use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::User,
    repositories::is_duplicate_key_error,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn mark_verified(&self, email: &str) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for users collection");

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(email_index).await?;

        log::info!("Successfully created indexes for users collection");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(insert_result) => {
                user.id = insert_result.inserted_id.as_object_id();
                Ok(user)
            }
            Err(err) if is_duplicate_key_error(&err) => Err(AppError::AlreadyExists(format!(
                "An account with email '{}' already exists",
                user.email
            ))),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let user = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await?;
        Ok(user)
    }

    async fn mark_verified(&self, email: &str) -> AppResult<()> {
        let update_result = self
            .collection
            .update_one(
                doc! { "email": email },
                doc! {
                    "$set": { "verified": true },
                    "$unset": { "otp_hash": "", "otp_expires_at": "" }
                },
            )
            .await?;

        if update_result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "No account with email '{}'",
                email
            )));
        }
        Ok(())
    }
}
