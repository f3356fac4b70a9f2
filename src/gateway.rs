//! Persistence gateway: generic parameterized CRUD.
//!
//! SQL identifiers come exclusively from the [`Table`] and [`Column`]
//! enumerations below; caller-supplied data only ever travels through bind
//! placeholders. Executors are injected per call (pool or open transaction),
//! so every unit of work acquires and releases its connection on every exit
//! path.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::order::OrderStatus;
use crate::domain::user::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    Users,
    Products,
    CartItems,
    Orders,
    OrderItems,
}

impl Table {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::CartItems => "cart_items",
            Self::Orders => "orders",
            Self::OrderItems => "order_items",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Id,
    UserId,
    ProductId,
    OrderId,
    Name,
    Email,
    PasswordHash,
    NationalId,
    ClassGroup,
    Shift,
    Role,
    Price,
    UnitPrice,
    Available,
    Stock,
    ImagePath,
    Quantity,
    Status,
    Total,
    PickupDate,
    PickupSlot,
    PaymentMethod,
    UpdatedAt,
}

impl Column {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "user_id",
            Self::ProductId => "product_id",
            Self::OrderId => "order_id",
            Self::Name => "name",
            Self::Email => "email",
            Self::PasswordHash => "password_hash",
            Self::NationalId => "national_id",
            Self::ClassGroup => "class_group",
            Self::Shift => "shift",
            Self::Role => "role",
            Self::Price => "price",
            Self::UnitPrice => "unit_price",
            Self::Available => "available",
            Self::Stock => "stock",
            Self::ImagePath => "image_path",
            Self::Quantity => "quantity",
            Self::Status => "status",
            Self::Total => "total",
            Self::PickupDate => "pickup_date",
            Self::PickupSlot => "pickup_slot",
            Self::PaymentMethod => "payment_method",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// A value headed for a bind placeholder.
#[derive(Clone, Debug)]
pub enum BindValue {
    Uuid(Uuid),
    Text(String),
    Int(i32),
    Bool(bool),
    Decimal(Decimal),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
    Status(OrderStatus),
    Role(Role),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => " = ",
            Self::Ne => " <> ",
            Self::Lt => " < ",
            Self::Le => " <= ",
            Self::Gt => " > ",
            Self::Ge => " >= ",
        }
    }
}

/// Structured predicate: column, operator, bound value. Never a raw string.
#[derive(Clone, Debug)]
pub struct Filter {
    pub column: Column,
    pub op: Op,
    pub value: BindValue,
}

impl Filter {
    pub fn eq(column: Column, value: BindValue) -> Self {
        Self { column, op: Op::Eq, value }
    }
}

fn push_value(builder: &mut QueryBuilder<'static, Postgres>, value: &BindValue) {
    match value {
        BindValue::Uuid(v) => builder.push_bind(*v),
        BindValue::Text(v) => builder.push_bind(v.clone()),
        BindValue::Int(v) => builder.push_bind(*v),
        BindValue::Bool(v) => builder.push_bind(*v),
        BindValue::Decimal(v) => builder.push_bind(*v),
        BindValue::Date(v) => builder.push_bind(*v),
        BindValue::Timestamp(v) => builder.push_bind(*v),
        BindValue::Json(v) => builder.push_bind(v.clone()),
        BindValue::Status(v) => builder.push_bind(*v),
        BindValue::Role(v) => builder.push_bind(*v),
    };
}

fn push_where(builder: &mut QueryBuilder<'static, Postgres>, filters: &[Filter]) {
    for (i, filter) in filters.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(filter.column.as_sql());
        builder.push(filter.op.as_sql());
        push_value(builder, &filter.value);
    }
}

fn select_builder(table: Table, filters: &[Filter]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT * FROM ");
    builder.push(table.as_sql());
    push_where(&mut builder, filters);
    builder
}

fn insert_builder(table: Table, values: &[(Column, BindValue)]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("INSERT INTO ");
    builder.push(table.as_sql());
    builder.push(" (");
    for (i, (column, _)) in values.iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(column.as_sql());
    }
    builder.push(") VALUES (");
    for (i, (_, value)) in values.iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        push_value(&mut builder, value);
    }
    builder.push(")");
    builder
}

fn update_builder(
    table: Table,
    sets: &[(Column, BindValue)],
    filters: &[Filter],
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE ");
    builder.push(table.as_sql());
    builder.push(" SET ");
    for (i, (column, value)) in sets.iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(column.as_sql());
        builder.push(" = ");
        push_value(&mut builder, value);
    }
    push_where(&mut builder, filters);
    builder
}

fn delete_builder(table: Table, filters: &[Filter]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("DELETE FROM ");
    builder.push(table.as_sql());
    push_where(&mut builder, filters);
    builder
}

pub async fn fetch_optional<'e, E, T>(
    executor: E,
    table: Table,
    filters: &[Filter],
) -> sqlx::Result<Option<T>>
where
    E: PgExecutor<'e>,
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut builder = select_builder(table, filters);
    builder.build_query_as::<T>().fetch_optional(executor).await
}

pub async fn fetch_all<'e, E, T>(
    executor: E,
    table: Table,
    filters: &[Filter],
) -> sqlx::Result<Vec<T>>
where
    E: PgExecutor<'e>,
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut builder = select_builder(table, filters);
    builder.build_query_as::<T>().fetch_all(executor).await
}

pub async fn insert<'e, E>(
    executor: E,
    table: Table,
    values: &[(Column, BindValue)],
) -> sqlx::Result<u64>
where
    E: PgExecutor<'e>,
{
    let mut builder = insert_builder(table, values);
    Ok(builder.build().execute(executor).await?.rows_affected())
}

/// Returns the number of rows updated; zero means the filters matched nothing.
pub async fn update<'e, E>(
    executor: E,
    table: Table,
    sets: &[(Column, BindValue)],
    filters: &[Filter],
) -> sqlx::Result<u64>
where
    E: PgExecutor<'e>,
{
    let mut builder = update_builder(table, sets, filters);
    Ok(builder.build().execute(executor).await?.rows_affected())
}

pub async fn delete<'e, E>(executor: E, table: Table, filters: &[Filter]) -> sqlx::Result<u64>
where
    E: PgExecutor<'e>,
{
    let mut builder = delete_builder(table, filters);
    Ok(builder.build().execute(executor).await?.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_sql_uses_placeholders() {
        let builder = select_builder(
            Table::CartItems,
            &[
                Filter::eq(Column::UserId, BindValue::Uuid(Uuid::now_v7())),
                Filter::eq(Column::ProductId, BindValue::Uuid(Uuid::now_v7())),
            ],
        );
        assert_eq!(
            builder.sql(),
            "SELECT * FROM cart_items WHERE user_id = $1 AND product_id = $2"
        );
    }

    #[test]
    fn test_select_without_filters_has_no_where() {
        let builder = select_builder(Table::Products, &[]);
        assert_eq!(builder.sql(), "SELECT * FROM products");
    }

    #[test]
    fn test_insert_sql_shape() {
        let builder = insert_builder(
            Table::CartItems,
            &[
                (Column::Id, BindValue::Uuid(Uuid::now_v7())),
                (Column::Quantity, BindValue::Int(3)),
            ],
        );
        assert_eq!(builder.sql(), "INSERT INTO cart_items (id, quantity) VALUES ($1, $2)");
    }

    #[test]
    fn test_update_sql_shape() {
        let builder = update_builder(
            Table::CartItems,
            &[(Column::Quantity, BindValue::Int(5))],
            &[Filter::eq(Column::Id, BindValue::Uuid(Uuid::now_v7()))],
        );
        assert_eq!(builder.sql(), "UPDATE cart_items SET quantity = $1 WHERE id = $2");
    }

    #[test]
    fn test_delete_sql_shape() {
        let builder = delete_builder(
            Table::CartItems,
            &[Filter::eq(Column::UserId, BindValue::Uuid(Uuid::now_v7()))],
        );
        assert_eq!(builder.sql(), "DELETE FROM cart_items WHERE user_id = $1");
    }

    #[test]
    fn test_comparison_operators() {
        let builder = select_builder(
            Table::Products,
            &[Filter { column: Column::Stock, op: Op::Ge, value: BindValue::Int(1) }],
        );
        assert_eq!(builder.sql(), "SELECT * FROM products WHERE stock >= $1");
    }
}
