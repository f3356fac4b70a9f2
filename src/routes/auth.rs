//! Registration, login and profile handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::domain::user::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, User};
use crate::error::{ApiError, ApiResult};
use crate::repo;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;
    let hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
    let user = repo::users::create(&state.db, &req, &hash).await?;
    let token = state.tokens.issue(user.id, user.role)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = repo::users::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    if !bcrypt::verify(&req.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized);
    }
    let token = state.tokens.issue(user.id, user.role)?;
    Ok(Json(AuthResponse { token, user }))
}

pub async fn profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<User>> {
    let user = repo::users::find_by_id(&state.db, user.id)
        .await?
        .ok_or(ApiError::NotFound("usuário não encontrado"))?;
    Ok(Json(user))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;
    if req.is_empty() {
        return Err(ApiError::Validation("nenhum campo para atualizar".to_string()));
    }
    let password_hash = match &req.password {
        Some(password) => Some(bcrypt::hash(password, bcrypt::DEFAULT_COST)?),
        None => None,
    };
    let changes = repo::users::ProfileChanges {
        name: req.name,
        email: req.email,
        password_hash,
        class_group: req.class_group,
        shift: req.shift,
    };
    let user = repo::users::update_profile(&state.db, user.id, changes)
        .await?
        .ok_or(ApiError::NotFound("usuário não encontrado"))?;
    Ok(Json(user))
}
