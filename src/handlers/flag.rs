//! Flag endpoints. Two behaviors set this resource apart: validation
//! failures report under "error" (singular), and update checks the service
//! result and answers 404 for a missing row instead of a storage error.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::service::flag::{self, Flag, FlagInput};
use crate::state::AppState;
use crate::validate::{self, FieldKind, FieldRule};

const RULES: &[FieldRule] = &[
    FieldRule::new("tax1", FieldKind::Int),
    FieldRule::new("tax2", FieldKind::Int),
    FieldRule::new("tax3", FieldKind::Int),
    FieldRule::new("tax4", FieldKind::Int),
    FieldRule::new("fs", FieldKind::Int),
    FieldRule::new("wic", FieldKind::Int),
];
const ERROR_KEY: &str = "error";
const NOT_FOUND: &str = "could not find your flag item";

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Flag>>, AppError> {
    Ok(Json(flag::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Flag>, AppError> {
    let found = match id.parse::<i32>() {
        Ok(id) => flag::find(&state.pool, id).await?,
        Err(_) => None,
    };
    found
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Flag>, AppError> {
    let input: FlagInput = validate::body(&body, ERROR_KEY, RULES)?;
    Ok(Json(flag::create(&state.pool, &input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Flag>, AppError> {
    let input: FlagInput = validate::body(&body, ERROR_KEY, RULES)?;
    let id = validate::route_id(&id)?;
    flag::update(&state.pool, id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("your flag could not be found".into()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>, AppError> {
    let id = validate::route_id(&id)?;
    flag::delete(&state.pool, id).await?;
    Ok(Json("your flag was deleted".to_string()))
}
