//! Database bootstrap: create the database named in the URL if needed, then
//! the pricebook tables.

use std::str::FromStr;

use sqlx::{ConnectOptions, PgPool};

use crate::error::AppError;

/// Idempotent DDL for the six tables. No foreign-key constraints: deletes
/// never cascade, and cross-table consistency belongs to the caller.
const TABLE_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        upc TEXT NOT NULL,
        description TEXT NOT NULL,
        retail_price DOUBLE PRECISION NOT NULL,
        retail_split INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS prices (
        id SERIAL PRIMARY KEY,
        sale_price DOUBLE PRECISION NOT NULL,
        sale_split INTEGER NOT NULL,
        sale_start DATE NOT NULL,
        sale_end DATE NOT NULL,
        tpr_price DOUBLE PRECISION NOT NULL,
        tpr_split INTEGER NOT NULL,
        tpr_start DATE NOT NULL,
        tpr_end DATE NOT NULL,
        product_id INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY,
        description TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY,
        description TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS flags (
        id SERIAL PRIMARY KEY,
        product_id INTEGER NOT NULL,
        tax1 INTEGER NOT NULL,
        tax2 INTEGER NOT NULL,
        tax3 INTEGER NOT NULL,
        tax4 INTEGER NOT NULL,
        fs INTEGER NOT NULL,
        wic INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS links (
        id SERIAL PRIMARY KEY,
        product_id INTEGER NOT NULL,
        category_id INTEGER,
        department_id INTEGER NOT NULL
    )
    "#,
];

/// Create every pricebook table that does not exist yet.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLE_DDL {
        tracing::debug!(ddl = %ddl.trim(), "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Create the database named in the URL if it is missing, via the admin
/// `postgres` database on the same server.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::Config(format!("invalid DATABASE_URL: {e}")))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {quoted}"))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::Config("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{base}postgres");
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}
