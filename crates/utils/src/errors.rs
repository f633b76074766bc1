use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    ValidationError(#[from] ValidationErrors),

    #[error(transparent)]
    AxumJsonRejection(#[from] JsonRejection),

    #[error(transparent)]
    MongoError(#[from] mongodb::error::Error),

    #[error("{0}")]
    InternalServerErrorWithContext(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::AxumJsonRejection(_) => StatusCode::BAD_REQUEST,
            // 客户端依赖 "not found" 返回 400 的既有约定
            AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::MongoError(_) | AppError::InternalServerErrorWithContext(_) | AppError::AnyhowError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回给客户端的消息
    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => first_validation_message(errors),
            AppError::AxumJsonRejection(rejection) => rejection.body_text(),
            AppError::MongoError(_) | AppError::AnyhowError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// 取字段名排序后第一个带 message 的校验错误，保证响应稳定
fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| (field, e)))
        .map(|(field, e)| match &e.message {
            Some(message) => message.to_string(),
            None => format!("Invalid field: {}", field),
        })
        .next()
        .unwrap_or_else(|| "Invalid request data".to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("🔴 {}", self);
        } else {
            warn!("⚠️ request rejected ({}): {}", status.as_u16(), self);
        }

        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
