//! Link endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::service::link::{self, Link, LinkInput};
use crate::state::AppState;
use crate::validate::{self, FieldKind, FieldRule};

const RULES: &[FieldRule] = &[
    FieldRule::new("categoryId", FieldKind::Int),
    FieldRule::new("departmentId", FieldKind::Int),
    FieldRule::new("productId", FieldKind::Int),
];
const ERROR_KEY: &str = "errors";
const NOT_FOUND: &str = "could not find our link";

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Link>>, AppError> {
    Ok(Json(link::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Link>, AppError> {
    let found = match id.parse::<i32>() {
        Ok(id) => link::find(&state.pool, id).await?,
        Err(_) => None,
    };
    found
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Link>, AppError> {
    let input: LinkInput = validate::body(&body, ERROR_KEY, RULES)?;
    Ok(Json(link::create(&state.pool, &input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Link>, AppError> {
    let input: LinkInput = validate::body(&body, ERROR_KEY, RULES)?;
    let id = validate::route_id(&id)?;
    Ok(Json(link::update(&state.pool, id, &input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>, AppError> {
    let id = validate::route_id(&id)?;
    link::delete(&state.pool, id).await?;
    Ok(Json("your link was deleted".to_string()))
}
