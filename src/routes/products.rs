//! Catalog handlers. Reads are public; mutations are admin-only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AdminUser;
use crate::domain::product::{CreateProductRequest, Product, UpdateProductRequest};
use crate::error::{ApiError, ApiResult};
use crate::repo;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(repo::products::list_available(&state.db).await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    let product = repo::products::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("produto não encontrado"))?;
    Ok(Json(product))
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    req.validate()?;
    let product = repo::products::create(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> ApiResult<Json<Product>> {
    req.validate()?;
    let product = repo::products::update(&state.db, id, &req)
        .await?
        .ok_or(ApiError::NotFound("produto não encontrado"))?;
    Ok(Json(product))
}

pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    repo::products::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
