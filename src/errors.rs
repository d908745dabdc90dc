use crate::models::FormErrors;
use axum::{http::StatusCode, Json};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub fields: Option<FormErrors>,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            fields: None,
        }
    }

    pub fn validation(fields: FormErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "activity failed validation".to_string(),
            fields: Some(fields),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self.fields {
            Some(fields) => (
                self.status,
                Json(json!({ "error": self.message, "fields": fields })),
            )
                .into_response(),
            None => (self.status, self.message).into_response(),
        }
    }
}
