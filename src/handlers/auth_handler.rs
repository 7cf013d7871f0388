use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::JwtService,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterRequest, VerifyEmailRequest},
        response::{AuthResponse, MessageResponse},
    },
};

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(MessageResponse {
        message: format!("Verification code sent to {}", user.email),
    }))
}

#[post("/verify-email")]
pub async fn verify_email(
    state: web::Data<AppState>,
    request: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, AppError> {
    state.user_service.verify_email(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Email verified, you can log in now".to_string(),
    }))
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    jwt_service: web::Data<JwtService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .user_service
        .authenticate(request.into_inner())
        .await?;

    // A fresh token means a fresh exam session id
    let token = jwt_service.create_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        username: user.username,
        email: user.email,
        role: user.role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_register_endpoint_structure() {
        let app = test::init_service(App::new().service(register)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(serde_json::json!({
                "username": "ramesh",
                "email": "ramesh@example.com",
                "password": "s3cret-pass"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        // Without app state and a real DB this fails, but the route exists
        assert!(resp.status().is_client_error() || resp.status().is_server_error());
    }

    #[actix_web::test]
    async fn test_login_endpoint_structure() {
        let app = test::init_service(App::new().service(login)).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({
                "email": "ramesh@example.com",
                "password": "s3cret-pass"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error() || resp.status().is_server_error());
    }
}
