//! Flag rows: per-product tax, food-stamp, and WIC eligibility markers,
//! all integer-valued.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub id: i32,
    pub product_id: i32,
    pub tax1: i32,
    pub tax2: i32,
    pub tax3: i32,
    pub tax4: i32,
    pub fs: i32,
    pub wic: i32,
}

/// `productId` is outside the validation table; absent on insert it binds
/// NULL and fails the NOT NULL column, absent on update it leaves the
/// stored value untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagInput {
    #[serde(default)]
    pub product_id: Option<i32>,
    pub tax1: i32,
    pub tax2: i32,
    pub tax3: i32,
    pub tax4: i32,
    pub fs: i32,
    pub wic: i32,
}

const PROJECTION: &str = "id, product_id, tax1, tax2, tax3, tax4, fs, wic";

pub async fn list(pool: &PgPool) -> Result<Vec<Flag>, AppError> {
    let rows = sqlx::query_as::<_, Flag>(&format!("SELECT {PROJECTION} FROM flags"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Flag>, AppError> {
    let row = sqlx::query_as::<_, Flag>(&format!("SELECT {PROJECTION} FROM flags WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, input: &FlagInput) -> Result<Flag, AppError> {
    let row = sqlx::query_as::<_, Flag>(&format!(
        "INSERT INTO flags (product_id, tax1, tax2, tax3, tax4, fs, wic) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {PROJECTION}"
    ))
    .bind(input.product_id)
    .bind(input.tax1)
    .bind(input.tax2)
    .bind(input.tax3)
    .bind(input.tax4)
    .bind(input.fs)
    .bind(input.wic)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Unlike the other resources this returns None for a missing row; the
/// handler reports that as 404 rather than letting a storage error through.
pub async fn update(pool: &PgPool, id: i32, input: &FlagInput) -> Result<Option<Flag>, AppError> {
    let row = sqlx::query_as::<_, Flag>(&format!(
        "UPDATE flags SET product_id = COALESCE($1, product_id), tax1 = $2, tax2 = $3, \
                          tax3 = $4, tax4 = $5, fs = $6, wic = $7 \
         WHERE id = $8 \
         RETURNING {PROJECTION}"
    ))
    .bind(input.product_id)
    .bind(input.tax1)
    .bind(input.tax2)
    .bind(input.tax3)
    .bind(input.tax4)
    .bind(input.fs)
    .bind(input.wic)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM flags WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::Db(sqlx::Error::RowNotFound));
    }
    Ok(())
}
