use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Question, Subject},
};

/// Filter for bank reads. Empty filter returns the whole bank.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestionFilter {
    pub subject: Option<Subject>,
    pub marks: Option<f64>,
}

impl QuestionFilter {
    pub fn by_subject_and_marks(subject: Subject, marks: f64) -> Self {
        QuestionFilter {
            subject: Some(subject),
            marks: Some(marks),
        }
    }

    fn into_document(self) -> Document {
        let mut filter = doc! {};
        if let Some(subject) = self.subject {
            filter.insert("subject", subject.as_str());
        }
        if let Some(marks) = self.marks {
            filter.insert("marks", marks);
        }
        filter
    }
}

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find(&self, filter: QuestionFilter) -> AppResult<Vec<Question>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>>;
    async fn insert_one(&self, question: Question) -> AppResult<Question>;
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<usize>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        // The selector always filters on (subject, marks)
        let subject_marks_index = IndexModel::builder()
            .keys(doc! { "subject": 1, "marks": 1 })
            .options(
                IndexOptions::builder()
                    .name("subject_marks".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(subject_marks_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find(&self, filter: QuestionFilter) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(filter.into_document())
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn insert_one(&self, question: Question) -> AppResult<Question> {
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<usize> {
        if questions.is_empty() {
            return Ok(0);
        }

        let result = self.collection.insert_many(&questions).await?;
        Ok(result.inserted_ids.len())
    }
}
