//! Product endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::service::product::{self, Product, ProductInput};
use crate::state::AppState;
use crate::validate::{self, FieldKind, FieldRule};

const RULES: &[FieldRule] = &[
    FieldRule::new("upc", FieldKind::Text),
    FieldRule::new("description", FieldKind::Text),
    FieldRule::new("retailPrice", FieldKind::Float),
    FieldRule::new("retailSplit", FieldKind::Int),
];
const ERROR_KEY: &str = "errors";
const NOT_FOUND: &str = "your product was not found";

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(product::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    // A non-numeric id cannot match any row, so it reads as not-found.
    let found = match id.parse::<i32>() {
        Ok(id) => product::find(&state.pool, id).await?,
        Err(_) => None,
    };
    found
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Product>, AppError> {
    let input: ProductInput = validate::body(&body, ERROR_KEY, RULES)?;
    Ok(Json(product::create(&state.pool, &input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Product>, AppError> {
    let input: ProductInput = validate::body(&body, ERROR_KEY, RULES)?;
    let id = validate::route_id(&id)?;
    Ok(Json(product::update(&state.pool, id, &input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>, AppError> {
    let id = validate::route_id(&id)?;
    product::delete(&state.pool, id).await?;
    Ok(Json(format!("Your product id {id} was deleted")))
}
