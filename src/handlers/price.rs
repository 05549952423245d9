//! Price endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::service::price::{self, Price, PriceInput};
use crate::state::AppState;
use crate::validate::{self, FieldKind, FieldRule};

const RULES: &[FieldRule] = &[
    FieldRule::new("salePrice", FieldKind::Float),
    FieldRule::new("saleSplit", FieldKind::Int),
    FieldRule::new("saleStart", FieldKind::Date),
    FieldRule::new("saleEnd", FieldKind::Date),
    FieldRule::new("tprPrice", FieldKind::Float),
    FieldRule::new("tprSplit", FieldKind::Int),
    FieldRule::new("tprStart", FieldKind::Date),
    FieldRule::new("tprEnd", FieldKind::Date),
];
const ERROR_KEY: &str = "errors";
const NOT_FOUND: &str = "your price was not found";

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Price>>, AppError> {
    Ok(Json(price::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Price>, AppError> {
    let found = match id.parse::<i32>() {
        Ok(id) => price::find(&state.pool, id).await?,
        Err(_) => None,
    };
    found
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Price>, AppError> {
    let input: PriceInput = validate::body(&body, ERROR_KEY, RULES)?;
    Ok(Json(price::create(&state.pool, &input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Price>, AppError> {
    let input: PriceInput = validate::body(&body, ERROR_KEY, RULES)?;
    let id = validate::route_id(&id)?;
    Ok(Json(price::update(&state.pool, id, &input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>, AppError> {
    let id = validate::route_id(&id)?;
    price::delete(&state.pool, id).await?;
    Ok(Json("your details have been deleted".to_string()))
}
