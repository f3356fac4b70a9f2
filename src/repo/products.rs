//! Catalog rows.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::product::{CreateProductRequest, Product, UpdateProductRequest};
use crate::error::{ApiError, ApiResult};
use crate::gateway::{self, BindValue, Column, Filter, Table};

pub async fn list_available(db: &PgPool) -> ApiResult<Vec<Product>> {
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE available ORDER BY name")
            .fetch_all(db)
            .await?;
    Ok(products)
}

pub async fn find(db: &PgPool, id: Uuid) -> ApiResult<Option<Product>> {
    Ok(gateway::fetch_optional(db, Table::Products, &[Filter::eq(Column::Id, BindValue::Uuid(id))])
        .await?)
}

pub async fn create(db: &PgPool, req: &CreateProductRequest) -> ApiResult<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (id, name, price, available, stock, image_path) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&req.name)
    .bind(req.price)
    .bind(req.available.unwrap_or(true))
    .bind(req.stock)
    .bind(&req.image_path)
    .fetch_one(db)
    .await?;
    Ok(product)
}

/// Partial update; untouched fields keep their value.
pub async fn update(db: &PgPool, id: Uuid, req: &UpdateProductRequest) -> ApiResult<Option<Product>> {
    let mut sets = Vec::new();
    if let Some(ref name) = req.name {
        sets.push((Column::Name, BindValue::Text(name.clone())));
    }
    if let Some(price) = req.price {
        sets.push((Column::Price, BindValue::Decimal(price)));
    }
    if let Some(available) = req.available {
        sets.push((Column::Available, BindValue::Bool(available)));
    }
    if let Some(stock) = req.stock {
        sets.push((Column::Stock, BindValue::Int(stock)));
    }
    if let Some(ref image_path) = req.image_path {
        sets.push((Column::ImagePath, BindValue::Text(image_path.clone())));
    }
    if !sets.is_empty() {
        sets.push((Column::UpdatedAt, BindValue::Timestamp(Utc::now())));
        gateway::update(
            db,
            Table::Products,
            &sets,
            &[Filter::eq(Column::Id, BindValue::Uuid(id))],
        )
        .await?;
    }
    find(db, id).await
}

/// Deletes a product and its cart references. Refused while any order item
/// still points at the product: order history keeps its join target.
pub async fn delete(db: &PgPool, id: Uuid) -> ApiResult<()> {
    let mut tx = db.begin().await?;

    let referenced: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM order_items WHERE product_id = $1 LIMIT 1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if referenced.is_some() {
        return Err(ApiError::Conflict("produto referenciado por pedidos".to_string()));
    }

    gateway::delete(
        &mut *tx,
        Table::CartItems,
        &[Filter::eq(Column::ProductId, BindValue::Uuid(id))],
    )
    .await?;
    let removed = gateway::delete(
        &mut *tx,
        Table::Products,
        &[Filter::eq(Column::Id, BindValue::Uuid(id))],
    )
    .await?;
    if removed == 0 {
        return Err(ApiError::NotFound("produto não encontrado"));
    }

    tx.commit().await?;
    Ok(())
}
