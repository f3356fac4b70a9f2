//! Error taxonomy and the HTTP error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Domain error surfaced by repositories, extractors and handlers.
///
/// Every variant carries a stable machine code and maps to one HTTP status;
/// the client always receives `{ "mensagem": ..., "erro": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("credenciais inválidas")]
    Unauthorized,
    #[error("token expirado")]
    TokenExpired,
    #[error("token inválido")]
    InvalidToken,
    #[error("acesso restrito a administradores")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error("transição de status inválida: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("status desconhecido: {0}")]
    InvalidStatus(String),
    #[error("produto indisponível")]
    Unavailable,
    #[error("estoque insuficiente")]
    InsufficientStock,
    #[error("erro interno no servidor")]
    Internal(#[source] anyhow::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidTransition { .. }
            | Self::InvalidStatus(_)
            | Self::Unavailable => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::TokenExpired | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::InsufficientStock => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine code for the `erro` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDACAO",
            Self::NotFound(_) => "NAO_ENCONTRADO",
            Self::Unauthorized => "NAO_AUTORIZADO",
            Self::TokenExpired => "TOKEN_EXPIRADO",
            Self::InvalidToken => "TOKEN_INVALIDO",
            Self::Forbidden => "ACESSO_NEGADO",
            Self::Conflict(_) => "CONFLITO",
            Self::InvalidTransition { .. } => "TRANSICAO_INVALIDA",
            Self::InvalidStatus(_) => "STATUS_INVALIDO",
            Self::Unavailable => "INDISPONIVEL",
            Self::InsufficientStock => "ESTOQUE_INSUFICIENTE",
            Self::Internal(_) => "ERRO_INTERNO",
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            // Unique-key violations (email, national id, cart upsert target)
            // are client conflicts, not server faults.
            if db.is_unique_violation() {
                return Self::Conflict("registro duplicado".to_string());
            }
        }
        Self::Internal(err.into())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(format!("dados inválidos: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mensagem = match &self {
            Self::Internal(source) => {
                tracing::error!(error = ?source, "unhandled internal error");
                if cfg!(debug_assertions) {
                    format!("{source:#}")
                } else {
                    self.to_string()
                }
            }
            other => other.to_string(),
        };
        let body = Json(serde_json::json!({ "mensagem": mensagem, "erro": self.code() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::InsufficientStock.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidTransition { from: "Entregue".into(), to: "Cancelado".into() }.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_machine_codes_are_stable() {
        assert_eq!(ApiError::TokenExpired.code(), "TOKEN_EXPIRADO");
        assert_eq!(ApiError::InvalidStatus("Feito".into()).code(), "STATUS_INVALIDO");
        assert_eq!(ApiError::Conflict("e-mail já cadastrado".into()).code(), "CONFLITO");
    }
}
