use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::{request::CreateQuestionRequest, response::ImportResponse},
};

#[post("/questions")]
pub async fn create_question(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let question = state
        .question_service
        .create_question(request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(question))
}

/// Bulk import: the body is the parsed JSON array an admin previously
/// uploaded as a file.
#[post("/questions/import")]
pub async fn import_questions(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<Vec<CreateQuestionRequest>>,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let inserted = state
        .question_service
        .import_questions(request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ImportResponse { inserted }))
}
