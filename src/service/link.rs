//! Link rows associate one product with at most one category and one
//! department. Only foreign-key integers are stored; the linked services
//! are never consulted.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i32,
    pub product_id: i32,
    pub category_id: Option<i32>,
    pub department_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInput {
    pub product_id: i32,
    pub category_id: i32,
    pub department_id: i32,
}

const PROJECTION: &str = "id, product_id, category_id, department_id";

pub async fn list(pool: &PgPool) -> Result<Vec<Link>, AppError> {
    let rows = sqlx::query_as::<_, Link>(&format!("SELECT {PROJECTION} FROM links"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Link>, AppError> {
    let row = sqlx::query_as::<_, Link>(&format!("SELECT {PROJECTION} FROM links WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &LinkInput) -> Result<Link, AppError> {
    let row = sqlx::query_as::<_, Link>(&format!(
        "INSERT INTO links (product_id, category_id, department_id) \
         VALUES ($1, $2, $3) \
         RETURNING {PROJECTION}"
    ))
    .bind(input.product_id)
    .bind(input.category_id)
    .bind(input.department_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &PgPool, id: i32, input: &LinkInput) -> Result<Link, AppError> {
    let row = sqlx::query_as::<_, Link>(&format!(
        "UPDATE links SET product_id = $1, category_id = $2, department_id = $3 \
         WHERE id = $4 \
         RETURNING {PROJECTION}"
    ))
    .bind(input.product_id)
    .bind(input.category_id)
    .bind(input.department_id)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM links WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::Db(sqlx::Error::RowNotFound));
    }
    Ok(())
}
