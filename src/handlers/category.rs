//! Category endpoints. Validation failures report under "error" (singular);
//! existing clients parse that key.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::service::category::{self, Category, CategoryInput};
use crate::state::AppState;
use crate::validate::{self, FieldKind, FieldRule};

const RULES: &[FieldRule] = &[
    FieldRule::new("id", FieldKind::Int),
    FieldRule::new("description", FieldKind::Text),
];
const ERROR_KEY: &str = "error";
const NOT_FOUND: &str = "your category was not found";

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(category::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, AppError> {
    let found = match id.parse::<i32>() {
        Ok(id) => category::find(&state.pool, id).await?,
        Err(_) => None,
    };
    found
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Category>, AppError> {
    let input: CategoryInput = validate::body(&body, ERROR_KEY, RULES)?;
    Ok(Json(category::create(&state.pool, &input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Category>, AppError> {
    let input: CategoryInput = validate::body(&body, ERROR_KEY, RULES)?;
    let id = validate::route_id(&id)?;
    Ok(Json(
        category::update(&state.pool, id, &input.description).await?,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>, AppError> {
    let id = validate::route_id(&id)?;
    category::delete(&state.pool, id).await?;
    Ok(Json("your category was deleted".to_string()))
}
