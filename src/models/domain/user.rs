use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: &str, email: &str, password_hash: &str) -> Self {
        User {
            id: None,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: UserRole::User,
            verified: false,
            otp_hash: None,
            otp_expires_at: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Stable account identifier: the ObjectId hex string once the
    /// record has been persisted, the email before that.
    pub fn account_id(&self) -> String {
        self.id
            .as_ref()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| self.email.clone())
    }

    pub fn otp_matches(&self, code: &str, now: DateTime<Utc>) -> bool {
        let hash_is_valid = self
            .otp_hash
            .as_deref()
            .map(|stored| stored == hash_code(code))
            .unwrap_or(false);
        let not_expired = self.otp_expires_at.map(|exp| exp > now).unwrap_or(false);

        hash_is_valid && not_expired
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

/// One-time codes are stored as digests, never in the clear.
pub fn hash_code(code: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_user_creation_defaults() {
        let user = User::new("ramesh", "ramesh@example.com", "hash");

        assert_eq!(user.username, "ramesh");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.verified);
        assert!(user.otp_hash.is_none());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_account_id_falls_back_to_email() {
        let mut user = User::new("ramesh", "ramesh@example.com", "hash");
        assert_eq!(user.account_id(), "ramesh@example.com");

        let oid = ObjectId::new();
        user.id = Some(oid);
        assert_eq!(user.account_id(), oid.to_hex());
    }

    #[test]
    fn test_otp_matches_requires_hash_and_expiry() {
        let now = Utc::now();
        let mut user = User::new("ramesh", "ramesh@example.com", "hash");
        user.otp_hash = Some(hash_code("482913"));
        user.otp_expires_at = Some(now + Duration::minutes(10));

        assert!(user.otp_matches("482913", now));
        assert!(!user.otp_matches("000000", now));
        assert!(!user.otp_matches("482913", now + Duration::minutes(11)));
    }

    #[test]
    fn test_hash_code_consistency() {
        let hash1 = hash_code("482913");
        let hash2 = hash_code("482913");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 produces 64 hex chars
        assert_ne!(hash_code("482913"), hash_code("482914"));
    }
}
