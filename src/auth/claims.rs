use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::user::{User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (account id)
    pub username: String,
    pub email: String,
    pub role: UserRole,
    /// Opaque exam-session id. Minted fresh at each login; the exam
    /// binding for this login is keyed by it, so one login carries at
    /// most one paper.
    pub sid: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.account_id(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            sid: Uuid::new_v4().to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}
