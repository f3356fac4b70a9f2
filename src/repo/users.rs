//! User rows.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::{RegisterRequest, User};
use crate::error::ApiResult;
use crate::gateway::{self, BindValue, Column, Filter, Table};

pub async fn find_by_id(db: &PgPool, id: Uuid) -> ApiResult<Option<User>> {
    Ok(gateway::fetch_optional(db, Table::Users, &[Filter::eq(Column::Id, BindValue::Uuid(id))])
        .await?)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> ApiResult<Option<User>> {
    Ok(gateway::fetch_optional(
        db,
        Table::Users,
        &[Filter::eq(Column::Email, BindValue::Text(email.to_string()))],
    )
    .await?)
}

/// Inserts a new `usuario`-role account. Duplicate email or national id
/// surfaces as `Conflict` via the unique-violation mapping.
pub async fn create(db: &PgPool, req: &RegisterRequest, password_hash: &str) -> ApiResult<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, name, email, password_hash, national_id, class_group, shift) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&req.name)
    .bind(&req.email)
    .bind(password_hash)
    .bind(&req.national_id)
    .bind(&req.class_group)
    .bind(&req.shift)
    .fetch_one(db)
    .await?;
    Ok(user)
}

pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub class_group: Option<String>,
    pub shift: Option<String>,
}

/// Applies only the provided fields; returns the fresh row.
pub async fn update_profile(db: &PgPool, id: Uuid, changes: ProfileChanges) -> ApiResult<Option<User>> {
    let mut sets = Vec::new();
    if let Some(name) = changes.name {
        sets.push((Column::Name, BindValue::Text(name)));
    }
    if let Some(email) = changes.email {
        sets.push((Column::Email, BindValue::Text(email)));
    }
    if let Some(hash) = changes.password_hash {
        sets.push((Column::PasswordHash, BindValue::Text(hash)));
    }
    if let Some(class_group) = changes.class_group {
        sets.push((Column::ClassGroup, BindValue::Text(class_group)));
    }
    if let Some(shift) = changes.shift {
        sets.push((Column::Shift, BindValue::Text(shift)));
    }
    if !sets.is_empty() {
        gateway::update(
            db,
            Table::Users,
            &sets,
            &[Filter::eq(Column::Id, BindValue::Uuid(id))],
        )
        .await?;
    }
    find_by_id(db, id).await
}
