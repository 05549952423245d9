//! Product rows: UPC, shelf description, everyday retail price and split.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub upc: String,
    pub description: String,
    pub retail_price: f64,
    pub retail_split: i32,
}

/// Body accepted by create and update; the id is always store-assigned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub upc: String,
    pub description: String,
    pub retail_price: f64,
    pub retail_split: i32,
}

pub async fn list(pool: &PgPool) -> Result<Vec<Product>, AppError> {
    let rows = sqlx::query_as::<_, Product>(
        "SELECT id, upc, description, retail_price, retail_split FROM products",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Product>, AppError> {
    let row = sqlx::query_as::<_, Product>(
        "SELECT id, upc, description, retail_price, retail_split FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &ProductInput) -> Result<Product, AppError> {
    let row = sqlx::query_as::<_, Product>(
        "INSERT INTO products (upc, description, retail_price, retail_split) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, upc, description, retail_price, retail_split",
    )
    .bind(&input.upc)
    .bind(&input.description)
    .bind(input.retail_price)
    .bind(input.retail_split)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// No existence pre-check; a missing row surfaces as RowNotFound.
pub async fn update(pool: &PgPool, id: i32, input: &ProductInput) -> Result<Product, AppError> {
    let row = sqlx::query_as::<_, Product>(
        "UPDATE products SET upc = $1, description = $2, retail_price = $3, retail_split = $4 \
         WHERE id = $5 \
         RETURNING id, upc, description, retail_price, retail_split",
    )
    .bind(&input.upc)
    .bind(&input.description)
    .bind(input.retail_price)
    .bind(input.retail_split)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::Db(sqlx::Error::RowNotFound));
    }
    Ok(())
}
