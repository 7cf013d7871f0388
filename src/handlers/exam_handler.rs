use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::DEFAULT_QUOTA_PLAN,
        dto::{
            request::SubmitAnswersRequest,
            response::{PaperQuestionDto, PaperResponse, ResultResponse, ResultSummaryDto},
        },
    },
};

/// Issue (or re-issue) the paper for this login's exam session. The
/// first call assembles and binds; reloads get the same paper back.
#[get("/paper")]
pub async fn get_paper(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let claims = auth.0;

    let attempt = state
        .attempt_service
        .bind_or_reuse(&claims.sid, &claims.sub, &DEFAULT_QUOTA_PLAN)
        .await?;
    let questions = state.attempt_service.resolve_questions(&attempt).await?;

    let total_possible = questions.iter().map(|q| q.marks).sum();

    Ok(HttpResponse::Ok().json(PaperResponse {
        attempt_id: attempt.attempt_id,
        total_possible,
        questions: questions.into_iter().map(PaperQuestionDto::from).collect(),
    }))
}

#[post("/submit")]
pub async fn submit_answers(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<SubmitAnswersRequest>,
) -> Result<HttpResponse, AppError> {
    let claims = auth.0;

    let result = state
        .scoring_service
        .score(&claims.sid, &claims.sub, &request.answers)
        .await?;

    Ok(HttpResponse::Ok().json(ResultResponse::from(result)))
}

#[get("/results")]
pub async fn list_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state.scoring_service.history(&auth.0.sub).await?;
    let summaries: Vec<ResultSummaryDto> =
        results.into_iter().map(ResultSummaryDto::from).collect();

    Ok(HttpResponse::Ok().json(summaries))
}

#[get("/results/{attempt_id}")]
pub async fn get_result(
    state: web::Data<AppState>,
    attempt_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .scoring_service
        .result_for(&attempt_id, &auth.0.sub)
        .await?;

    Ok(HttpResponse::Ok().json(ResultResponse::from(result)))
}
