//! Users and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Usuario,
    Admin,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub national_id: Option<String>,
    pub class_group: Option<String>,
    pub shift: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 72))]
    pub password: String,
    #[validate(length(min = 11, max = 14))]
    pub national_id: Option<String>,
    pub class_group: Option<String>,
    pub shift: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 72))]
    pub password: Option<String>,
    pub class_group: Option<String>,
    pub shift: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.class_group.is_none()
            && self.shift.is_none()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            name: "Ana Souza".into(),
            email: "ana@escola.br".into(),
            password: "senha123".into(),
            national_id: None,
            class_group: Some("3B".into()),
            shift: Some("manhã".into()),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest { email: "nao-e-email".into(), ..ok };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_user_serialization_hides_hash() {
        let user = User {
            id: Uuid::now_v7(),
            name: "Ana".into(),
            email: "ana@escola.br".into(),
            password_hash: "$2b$12$abc".into(),
            national_id: None,
            class_group: None,
            shift: None,
            role: Role::Usuario,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("\"role\":\"usuario\""));
    }
}
