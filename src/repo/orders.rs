//! Order rows and the checkout transaction.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::cart::CartLine;
use crate::domain::order::{CheckoutRequest, Order, OrderItemDetail, OrderStatus};
use crate::error::{ApiError, ApiResult};
use crate::gateway::{self, BindValue, Column, Filter, Table};

/// Creates the order and its line items in one transaction.
///
/// Inserts the order row with the precomputed total, snapshots each cart
/// line's unit price into an order item, and decrements tracked stock with a
/// guarded update. Any failure rolls the whole thing back; the caller clears
/// the cart only after commit.
pub async fn create_from_cart(
    db: &PgPool,
    user_id: Uuid,
    req: &CheckoutRequest,
    lines: &[CartLine],
    total: Decimal,
) -> ApiResult<Order> {
    let mut tx = db.begin().await?;

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (id, user_id, status, total, pickup_date, pickup_slot, payment_method, card_details) \
         VALUES ($1, $2, 'Pendente', $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(total)
    .bind(req.pickup_date)
    .bind(&req.pickup_slot)
    .bind(&req.payment_method)
    .bind(&req.card_details)
    .fetch_one(&mut *tx)
    .await?;

    for line in lines {
        // NULL stock means untracked; tracked stock must cover the quantity.
        let affected = sqlx::query(
            "UPDATE products SET stock = stock - $2, updated_at = NOW() \
             WHERE id = $1 AND (stock IS NULL OR stock >= $2)",
        )
        .bind(line.product_id)
        .bind(line.quantity)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if affected == 0 {
            return Err(ApiError::InsufficientStock);
        }

        gateway::insert(
            &mut *tx,
            Table::OrderItems,
            &[
                (Column::Id, BindValue::Uuid(Uuid::now_v7())),
                (Column::OrderId, BindValue::Uuid(order.id)),
                (Column::ProductId, BindValue::Uuid(line.product_id)),
                (Column::Quantity, BindValue::Int(line.quantity)),
                (Column::UnitPrice, BindValue::Decimal(line.unit_price)),
            ],
        )
        .await?;
    }

    tx.commit().await?;
    Ok(order)
}

pub async fn find(db: &PgPool, id: Uuid) -> ApiResult<Option<Order>> {
    Ok(gateway::fetch_optional(db, Table::Orders, &[Filter::eq(Column::Id, BindValue::Uuid(id))])
        .await?)
}

/// Own orders, newest first, then earliest pickup first.
pub async fn list_for_user(db: &PgPool, user_id: Uuid, only_active: bool) -> ApiResult<Vec<Order>> {
    let sql = if only_active {
        "SELECT * FROM orders WHERE user_id = $1 \
         AND status IN ('Pendente', 'Em Preparo', 'Pronto') \
         ORDER BY created_at DESC, pickup_date ASC, pickup_slot ASC"
    } else {
        "SELECT * FROM orders WHERE user_id = $1 \
         ORDER BY created_at DESC, pickup_date ASC, pickup_slot ASC"
    };
    let orders = sqlx::query_as::<_, Order>(sql).bind(user_id).fetch_all(db).await?;
    Ok(orders)
}

/// System-wide non-terminal orders for the kitchen board.
pub async fn list_active(db: &PgPool) -> ApiResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE status IN ('Pendente', 'Em Preparo', 'Pronto') \
         ORDER BY created_at DESC, pickup_date ASC, pickup_slot ASC",
    )
    .fetch_all(db)
    .await?;
    Ok(orders)
}

pub async fn items_with_product(db: &PgPool, order_id: Uuid) -> ApiResult<Vec<OrderItemDetail>> {
    let items = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.id, oi.product_id, p.name AS product_name, oi.quantity, oi.unit_price, \
                p.price AS current_price, p.image_path \
         FROM order_items oi \
         JOIN products p ON p.id = oi.product_id \
         WHERE oi.order_id = $1 \
         ORDER BY p.name",
    )
    .bind(order_id)
    .fetch_all(db)
    .await?;
    Ok(items)
}

/// Single-statement status write. `Entregue` stamps the completion time and
/// `Cancelado` the cancellation time; the precondition check happens before
/// the call, so a lost race is last-write-wins at the row level.
pub async fn set_status(db: &PgPool, id: Uuid, status: OrderStatus) -> ApiResult<Order> {
    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET status = $2, \
         completed_at = CASE WHEN $2 = 'Entregue'::order_status THEN NOW() ELSE completed_at END, \
         cancelled_at = CASE WHEN $2 = 'Cancelado'::order_status THEN NOW() ELSE cancelled_at END \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(db)
    .await?
    .ok_or(ApiError::NotFound("pedido não encontrado"))?;
    Ok(order)
}
