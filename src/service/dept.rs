//! Department rows. Same shape and id scheme as categories.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub id: i32,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentInput {
    pub id: i32,
    pub description: String,
}

pub async fn list(pool: &PgPool) -> Result<Vec<Department>, AppError> {
    let rows = sqlx::query_as::<_, Department>("SELECT id, description FROM departments")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Department>, AppError> {
    let row =
        sqlx::query_as::<_, Department>("SELECT id, description FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &DepartmentInput) -> Result<Department, AppError> {
    let row = sqlx::query_as::<_, Department>(
        "INSERT INTO departments (id, description) VALUES ($1, $2) RETURNING id, description",
    )
    .bind(input.id)
    .bind(&input.description)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &PgPool, id: i32, description: &str) -> Result<Department, AppError> {
    let row = sqlx::query_as::<_, Department>(
        "UPDATE departments SET description = $1 WHERE id = $2 RETURNING id, description",
    )
    .bind(description)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM departments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::Db(sqlx::Error::RowNotFound));
    }
    Ok(())
}
