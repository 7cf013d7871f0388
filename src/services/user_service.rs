use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use validator::Validate;

use crate::{
    auth::password,
    errors::{AppError, AppResult},
    models::{
        domain::user::{hash_code, User},
        dto::request::{LoginRequest, RegisterRequest, VerifyEmailRequest},
    },
    repositories::UserRepository,
    services::otp::OtpSender,
};

/// Registration, email verification and credential checks.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    otp_sender: Arc<dyn OtpSender>,
    otp_ttl_minutes: i64,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        otp_sender: Arc<dyn OtpSender>,
        otp_ttl_minutes: i64,
    ) -> Self {
        Self {
            users,
            otp_sender,
            otp_ttl_minutes,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "An account with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = password::hash_password(&request.password)?;
        let code = generate_code();

        let mut user = User::new(&request.username, &request.email, &password_hash);
        user.otp_hash = Some(hash_code(&code));
        user.otp_expires_at = Some(Utc::now() + Duration::minutes(self.otp_ttl_minutes));

        let user = self.users.create(user).await?;
        self.otp_sender.send(&user.email, &code).await?;

        log::info!("Registered account for {}", user.email);
        Ok(user)
    }

    pub async fn verify_email(&self, request: VerifyEmailRequest) -> AppResult<()> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No account with email '{}'", request.email)))?;

        if user.verified {
            return Ok(());
        }

        if !user.otp_matches(&request.code, Utc::now()) {
            return Err(AppError::Unauthorized(
                "Invalid or expired verification code".to_string(),
            ));
        }

        self.users.mark_verified(&request.email).await?;
        log::info!("Verified email for {}", request.email);
        Ok(())
    }

    /// Credential check for login. The caller mints the session token;
    /// this only decides whether it may.
    pub async fn authenticate(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !password::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if !user.verified {
            return Err(AppError::Unauthorized(
                "Email address has not been verified".to_string(),
            ));
        }

        Ok(user)
    }
}

/// 6-digit one-time code, zero-padded.
fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}
