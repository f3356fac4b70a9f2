//! Cart rows.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::cart::{CartItem, CartLine};
use crate::error::ApiResult;
use crate::gateway::{self, BindValue, Column, Filter, Table};

/// Cart rows joined with live product data, oldest first.
pub async fn lines(db: &PgPool, user_id: Uuid) -> ApiResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT ci.id, ci.product_id, p.name AS product_name, p.price AS unit_price, \
                ci.quantity, p.available, p.image_path \
         FROM cart_items ci \
         JOIN products p ON p.id = ci.product_id \
         WHERE ci.user_id = $1 \
         ORDER BY ci.added_at",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(lines)
}

pub async fn find_item(db: &PgPool, user_id: Uuid, item_id: Uuid) -> ApiResult<Option<CartItem>> {
    Ok(gateway::fetch_optional(
        db,
        Table::CartItems,
        &[
            Filter::eq(Column::Id, BindValue::Uuid(item_id)),
            Filter::eq(Column::UserId, BindValue::Uuid(user_id)),
        ],
    )
    .await?)
}

pub async fn find_by_product(
    db: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
) -> ApiResult<Option<CartItem>> {
    Ok(gateway::fetch_optional(
        db,
        Table::CartItems,
        &[
            Filter::eq(Column::UserId, BindValue::Uuid(user_id)),
            Filter::eq(Column::ProductId, BindValue::Uuid(product_id)),
        ],
    )
    .await?)
}

/// Adds to the existing row for (user, product) or creates one; never a
/// duplicate row per product.
pub async fn upsert_item(
    db: &PgPool,
    user_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> ApiResult<CartItem> {
    let item = sqlx::query_as::<_, CartItem>(
        "INSERT INTO cart_items (id, user_id, product_id, quantity) VALUES ($1, $2, $3, $4) \
         ON CONFLICT (user_id, product_id) \
         DO UPDATE SET quantity = cart_items.quantity + $4 \
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(db)
    .await?;
    Ok(item)
}

pub async fn set_quantity(db: &PgPool, item_id: Uuid, quantity: i32) -> ApiResult<u64> {
    Ok(gateway::update(
        db,
        Table::CartItems,
        &[(Column::Quantity, BindValue::Int(quantity))],
        &[Filter::eq(Column::Id, BindValue::Uuid(item_id))],
    )
    .await?)
}

/// Idempotent by id; zero rows means the item was not the caller's.
pub async fn remove(db: &PgPool, user_id: Uuid, item_id: Uuid) -> ApiResult<u64> {
    Ok(gateway::delete(
        db,
        Table::CartItems,
        &[
            Filter::eq(Column::Id, BindValue::Uuid(item_id)),
            Filter::eq(Column::UserId, BindValue::Uuid(user_id)),
        ],
    )
    .await?)
}

/// Drops every row for the user; a no-op on an empty cart.
pub async fn clear<'e, E>(executor: E, user_id: Uuid) -> ApiResult<u64>
where
    E: PgExecutor<'e>,
{
    Ok(gateway::delete(
        executor,
        Table::CartItems,
        &[Filter::eq(Column::UserId, BindValue::Uuid(user_id))],
    )
    .await?)
}
