//! Category rows. Ids come from the client's numbering scheme, not the
//! store, so inserts carry the id and collide with a uniqueness violation.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub id: i32,
    pub description: String,
}

pub async fn list(pool: &PgPool) -> Result<Vec<Category>, AppError> {
    let rows = sqlx::query_as::<_, Category>("SELECT id, description FROM categories")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Category>, AppError> {
    let row = sqlx::query_as::<_, Category>("SELECT id, description FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &CategoryInput) -> Result<Category, AppError> {
    let row = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, description) VALUES ($1, $2) RETURNING id, description",
    )
    .bind(input.id)
    .bind(&input.description)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Only the description moves; the path id names the row and the body id is
/// ignored.
pub async fn update(pool: &PgPool, id: i32, description: &str) -> Result<Category, AppError> {
    let row = sqlx::query_as::<_, Category>(
        "UPDATE categories SET description = $1 WHERE id = $2 RETURNING id, description",
    )
    .bind(description)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::Db(sqlx::Error::RowNotFound));
    }
    Ok(())
}
