use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoExamSessionRepository, MongoQuestionRepository, MongoResultRepository,
        MongoUserRepository,
    },
    services::{
        AttemptService, LogOtpSender, PaperSelector, QuestionService, ScoringService, UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub user_service: Arc<UserService>,
    pub question_service: Arc<QuestionService>,
    pub attempt_service: Arc<AttemptService>,
    pub scoring_service: Arc<ScoringService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let database = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&database));
        question_repository.ensure_indexes().await?;

        let session_repository = Arc::new(MongoExamSessionRepository::new(&database));
        session_repository.ensure_indexes().await?;

        let result_repository = Arc::new(MongoResultRepository::new(&database));
        result_repository.ensure_indexes().await?;

        let user_repository = Arc::new(MongoUserRepository::new(&database));
        user_repository.ensure_indexes().await?;

        let user_service = Arc::new(UserService::new(
            user_repository,
            Arc::new(LogOtpSender),
            config.otp_ttl_minutes,
        ));

        let question_service = Arc::new(QuestionService::new(question_repository.clone()));

        let selector = PaperSelector::new(question_repository.clone());
        let attempt_service = Arc::new(AttemptService::new(
            selector,
            session_repository.clone(),
            question_repository.clone(),
        ));

        let scoring_service = Arc::new(ScoringService::new(
            session_repository,
            question_repository,
            result_repository,
        ));

        Ok(Self {
            database,
            user_service,
            question_service,
            attempt_service,
            scoring_service,
            config: Arc::new(config),
        })
    }
}
