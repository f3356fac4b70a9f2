//! Cart handlers: availability and stock are checked at every mutation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::domain::cart::{AddItemRequest, CartItem, CartView, UpdateQuantityRequest};
use crate::domain::product::Product;
use crate::error::{ApiError, ApiResult};
use crate::repo;
use crate::state::AppState;

pub async fn get_cart(State(state): State<AppState>, user: CurrentUser) -> ApiResult<Json<CartView>> {
    let lines = repo::cart::lines(&state.db, user.id).await?;
    Ok(Json(CartView::new(lines)))
}

pub async fn add_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<AddItemRequest>,
) -> ApiResult<(StatusCode, Json<CartItem>)> {
    if req.quantity <= 0 {
        return Err(ApiError::Validation("quantidade deve ser maior que zero".to_string()));
    }
    let product = repo::products::find(&state.db, req.product_id)
        .await?
        .ok_or(ApiError::NotFound("produto não encontrado"))?;
    if !product.available {
        return Err(ApiError::Unavailable);
    }
    let in_cart = repo::cart::find_by_product(&state.db, user.id, req.product_id)
        .await?
        .map(|item| item.quantity)
        .unwrap_or(0);
    check_stock(&product, in_cart + req.quantity)?;
    let item = repo::cart::upsert_item(&state.db, user.id, req.product_id, req.quantity).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateQuantityRequest>,
) -> ApiResult<Json<CartItem>> {
    if req.quantity <= 0 {
        return Err(ApiError::Validation("quantidade deve ser maior que zero".to_string()));
    }
    let item = repo::cart::find_item(&state.db, user.id, id)
        .await?
        .ok_or(ApiError::NotFound("item não encontrado no carrinho"))?;
    let product = repo::products::find(&state.db, item.product_id)
        .await?
        .ok_or(ApiError::NotFound("produto não encontrado"))?;
    check_stock(&product, req.quantity)?;
    repo::cart::set_quantity(&state.db, item.id, req.quantity).await?;
    Ok(Json(CartItem { quantity: req.quantity, ..item }))
}

pub async fn remove_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let removed = repo::cart::remove(&state.db, user.id, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("item não encontrado no carrinho"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear(State(state): State<AppState>, user: CurrentUser) -> ApiResult<StatusCode> {
    repo::cart::clear(&state.db, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn check_stock(product: &Product, wanted: i32) -> ApiResult<()> {
    if let Some(stock) = product.stock {
        if wanted > stock {
            return Err(ApiError::InsufficientStock);
        }
    }
    Ok(())
}
