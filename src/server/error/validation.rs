use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{FieldErrorDto, ValidationErrorDto};

/// Field-scoped validation failures collected while checking a request.
#[derive(Error, Debug, Default)]
#[error("Validation failed for {} field(s)", .fields.len())]
pub struct ValidationError {
    pub fields: Vec<FieldErrorDto>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.push(FieldErrorDto {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Returns `Err(self)` when any field failed.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorDto {
                error: "Validation failed".to_string(),
                fields: self.fields,
            }),
        )
            .into_response()
    }
}
