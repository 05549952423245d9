//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("validation failed")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error("invalid id '{0}'")]
    InvalidId(String),
    #[error("config: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(msg)).into_response(),
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors.to_body())).into_response()
            }
            // RowNotFound included: update/delete issue the write blind, so a
            // missing row surfaces like any other storage failure.
            AppError::Db(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(e.to_string())).into_response()
            }
            AppError::Decode(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(e.to_string())).into_response()
            }
            AppError::InvalidId(_) | AppError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(self.to_string())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{FieldError, ValidationErrors};

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound("your product was not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let errors = ValidationErrors {
            key: "errors",
            items: vec![FieldError::missing("upc")],
        };
        let resp = AppError::Validation(errors).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn row_not_found_maps_to_500() {
        let resp = AppError::Db(sqlx::Error::RowNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_id_maps_to_500() {
        let resp = AppError::InvalidId("abc".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
