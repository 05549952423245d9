//! Price rows: two independent promotional windows (sale and temporary
//! price reduction) per product. Both windows may overlap; the register
//! decides which applies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::validate::loose_date;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: i32,
    pub sale_price: f64,
    pub sale_split: i32,
    pub sale_start: NaiveDate,
    pub sale_end: NaiveDate,
    pub tpr_price: f64,
    pub tpr_split: i32,
    pub tpr_start: NaiveDate,
    pub tpr_end: NaiveDate,
    pub product_id: i32,
}

/// `productId` is not part of the validation table; when absent it binds as
/// NULL on insert (the NOT NULL column rejects it) and leaves the stored
/// value untouched on update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    pub sale_price: f64,
    pub sale_split: i32,
    #[serde(deserialize_with = "loose_date::deserialize")]
    pub sale_start: NaiveDate,
    #[serde(deserialize_with = "loose_date::deserialize")]
    pub sale_end: NaiveDate,
    pub tpr_price: f64,
    pub tpr_split: i32,
    #[serde(deserialize_with = "loose_date::deserialize")]
    pub tpr_start: NaiveDate,
    #[serde(deserialize_with = "loose_date::deserialize")]
    pub tpr_end: NaiveDate,
    #[serde(default)]
    pub product_id: Option<i32>,
}

const PROJECTION: &str = "id, sale_price, sale_split, sale_start, sale_end, \
                          tpr_price, tpr_split, tpr_start, tpr_end, product_id";

pub async fn list(pool: &PgPool) -> Result<Vec<Price>, AppError> {
    let rows = sqlx::query_as::<_, Price>(&format!("SELECT {PROJECTION} FROM prices"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Price>, AppError> {
    let row = sqlx::query_as::<_, Price>(&format!(
        "SELECT {PROJECTION} FROM prices WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &PriceInput) -> Result<Price, AppError> {
    let row = sqlx::query_as::<_, Price>(&format!(
        "INSERT INTO prices (sale_price, sale_split, sale_start, sale_end, \
                             tpr_price, tpr_split, tpr_start, tpr_end, product_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING {PROJECTION}"
    ))
    .bind(input.sale_price)
    .bind(input.sale_split)
    .bind(input.sale_start)
    .bind(input.sale_end)
    .bind(input.tpr_price)
    .bind(input.tpr_split)
    .bind(input.tpr_start)
    .bind(input.tpr_end)
    .bind(input.product_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &PgPool, id: i32, input: &PriceInput) -> Result<Price, AppError> {
    let row = sqlx::query_as::<_, Price>(&format!(
        "UPDATE prices SET sale_price = $1, sale_split = $2, sale_start = $3, sale_end = $4, \
                           tpr_price = $5, tpr_split = $6, tpr_start = $7, tpr_end = $8, \
                           product_id = COALESCE($9, product_id) \
         WHERE id = $10 \
         RETURNING {PROJECTION}"
    ))
    .bind(input.sale_price)
    .bind(input.sale_split)
    .bind(input.sale_start)
    .bind(input.sale_end)
    .bind(input.tpr_price)
    .bind(input.tpr_split)
    .bind(input.tpr_start)
    .bind(input.tpr_end)
    .bind(input.product_id)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM prices WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::Db(sqlx::Error::RowNotFound));
    }
    Ok(())
}
