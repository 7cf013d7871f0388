use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::MessageResponse};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.database.health_check().await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "ok".to_string(),
    }))
}
