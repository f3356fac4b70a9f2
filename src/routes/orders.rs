//! Order handlers: checkout, tracking and the admin status board.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AdminUser, CurrentUser};
use crate::domain::cart::{cart_total, CartLine};
use crate::domain::order::{
    is_valid_payment_method, CheckoutRequest, Order, OrderItemDetail, OrderStatus, SetStatusRequest,
};
use crate::domain::pickup::is_valid_pickup_date;
use crate::error::{ApiError, ApiResult};
use crate::repo;
use crate::state::AppState;

pub async fn checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    if !is_valid_payment_method(&req.payment_method) {
        return Err(ApiError::Validation("forma de pagamento inválida".to_string()));
    }
    if !state.schedule.is_valid_slot(&req.pickup_slot) {
        return Err(ApiError::Validation("horário de retirada inválido".to_string()));
    }
    if !is_valid_pickup_date(req.pickup_date, Utc::now().date_naive()) {
        return Err(ApiError::Validation("data de retirada no passado".to_string()));
    }

    // Lines whose product went unavailable since being added are skipped,
    // mirroring the cart total policy.
    let lines: Vec<CartLine> = repo::cart::lines(&state.db, user.id)
        .await?
        .into_iter()
        .filter(|line| line.available)
        .collect();
    if lines.is_empty() {
        return Err(ApiError::Validation("carrinho vazio".to_string()));
    }
    let total = cart_total(&lines);

    let order = repo::orders::create_from_cart(&state.db, user.id, &req, &lines, total).await?;

    // Cart cleanup is best-effort: the committed order stands either way.
    if let Err(err) = repo::cart::clear(&state.db, user.id).await {
        tracing::warn!(order_id = %order.id, error = ?err, "cart clear failed after checkout");
    }

    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize)]
pub struct ListOwnParams {
    pub ativos: Option<bool>,
}

pub async fn list_own(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<ListOwnParams>,
) -> ApiResult<Json<Vec<Order>>> {
    let orders =
        repo::orders::list_for_user(&state.db, user.id, params.ativos.unwrap_or(false)).await?;
    Ok(Json(orders))
}

pub async fn items(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<OrderItemDetail>>> {
    let order = repo::orders::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("pedido não encontrado"))?;
    if order.user_id != user.id && !user.is_admin() {
        return Err(ApiError::NotFound("pedido não encontrado"));
    }
    Ok(Json(repo::orders::items_with_product(&state.db, order.id).await?))
}

/// Owner-side cancellation, permitted only while still `Pendente`.
pub async fn cancel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    let order = repo::orders::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("pedido não encontrado"))?;
    if order.user_id != user.id {
        return Err(ApiError::NotFound("pedido não encontrado"));
    }
    if order.status != OrderStatus::Pendente {
        return Err(ApiError::InvalidTransition {
            from: order.status.to_string(),
            to: OrderStatus::Cancelado.to_string(),
        });
    }
    let order = repo::orders::set_status(&state.db, order.id, OrderStatus::Cancelado).await?;
    Ok(Json(order))
}

pub async fn admin_active(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(repo::orders::list_active(&state.db).await?))
}

pub async fn admin_set_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> ApiResult<Json<Order>> {
    let target =
        OrderStatus::parse(&req.status).ok_or_else(|| ApiError::InvalidStatus(req.status.clone()))?;
    let order = repo::orders::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("pedido não encontrado"))?;
    if !order.status.can_advance_to(target) {
        return Err(ApiError::InvalidTransition {
            from: order.status.to_string(),
            to: target.to_string(),
        });
    }
    let order = repo::orders::set_status(&state.db, order.id, target).await?;
    Ok(Json(order))
}
