//! # ماژول مدیریت خطاها (Error Handling)
//!
//! همه خطاهای برنامه در یک enum جمع شدن و هر کدوم به یه status code و
//! بدنه‌ی `{"detail": ...}` تبدیل میشه.
//!
//! ## شکل بدنه خطا
//!
//! ```json
//! {"detail": "کد ملی قبلاً ثبت شده است."}
//! {"detail": [{"loc": ["body", "credits"], "msg": "...", "type": "invalid_range"}]}
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::models::RecordKind;
use crate::validation::{self, FieldError};

// =====================================
// Result Type Alias
// =====================================
/// به جای `Result<Professor, AppError>` می‌نویسیم `Result<Professor>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// =====================================
// Custom Error Enum
// =====================================
/// خطای اصلی برنامه
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای کاربر (4xx)
    // ----------------------------------------
    /// یک یا چند فیلد قوانین رو رعایت نکردن - 400
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// بدنه یا query نامعتبر - 400
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// کلید اصلی تکراری - 400
    #[error("{kind} with id '{id}' already exists")]
    DuplicateKey { kind: RecordKind, id: String },

    /// کد ملی استاد تکراری - 400
    #[error("National ID '{0}' is already registered")]
    DuplicateNationalId(String),

    /// پیدا نشد - 404
    #[error("{0}")]
    NotFound(String),

    // ----------------------------------------
    // خطاهای سرور (5xx)
    // ----------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ----------------------------------------
    // خطاهای تبدیل شده از کتابخانه‌ها
    // ----------------------------------------
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// HTTP status code متناسب با خطا
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::BadRequest(_)
            | Self::DuplicateKey { .. }
            | Self::DuplicateNationalId(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            Self::Config(_)
            | Self::Database(_)
            | Self::Migrate(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// رکورد برای ویرایش پیدا نشد
    #[must_use]
    pub fn record_not_found(kind: RecordKind) -> Self {
        Self::NotFound(kind.not_found_message())
    }

    /// پیام قابل نمایش برای کاربر
    fn detail(&self) -> ErrorDetail {
        match self {
            Self::Validation(errors) => ErrorDetail::Fields(errors.clone()),
            Self::DuplicateKey { kind, .. } => {
                ErrorDetail::Message(kind.duplicate_key_message().to_string())
            }
            Self::DuplicateNationalId(_) => {
                ErrorDetail::Message("کد ملی قبلاً ثبت شده است.".to_string())
            }
            Self::BadRequest(message) | Self::NotFound(message) => {
                ErrorDetail::Message(message.clone())
            }
            other => ErrorDetail::Message(other.to_string()),
        }
    }
}

// =====================================
// Error Response DTO
// =====================================
/// محتوای `detail`: یا یک پیام یا فهرست خطای فیلدها
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// بدنه پاسخ خطا
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

// =====================================
// IntoResponse Implementation
// =====================================
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(error = %self, "Server error occurred");
        }

        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.detail(),
        };

        (status, Json(body)).into_response()
    }
}

// =====================================
// From Implementations
// =====================================
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(validation::field_errors(&errors))
    }
}

// =====================================
// Option Extension
// =====================================
/// Extension trait برای Option
pub trait OptionExt<T> {
    /// تبدیل None به AppError::NotFound
    fn ok_or_not_found(self, message: impl Into<String>) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AppError::NotFound(message.into()))
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RuleKind;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation(Vec::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DuplicateKey {
                kind: RecordKind::Course,
                id: "40101".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Config("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_detail_shapes() {
        let fields = AppError::Validation(vec![FieldError::new(
            "credits",
            RuleKind::InvalidRange,
            "خارج از بازه",
        )]);
        let json = serde_json::to_value(ErrorResponse {
            detail: fields.detail(),
        })
        .unwrap();
        assert_eq!(json["detail"][0]["loc"][1], "credits");

        let duplicate = AppError::DuplicateKey {
            kind: RecordKind::Course,
            id: "40101".to_string(),
        };
        let json = serde_json::to_value(ErrorResponse {
            detail: duplicate.detail(),
        })
        .unwrap();
        assert_eq!(json["detail"], "کد درس قبلاً ثبت شده است.");

        let message = AppError::record_not_found(RecordKind::Student);
        let json = serde_json::to_value(ErrorResponse {
            detail: message.detail(),
        })
        .unwrap();
        assert_eq!(json["detail"], "Student not found");
    }

    #[test]
    fn test_option_extension() {
        let some_value: Option<i32> = Some(42);
        let none_value: Option<i32> = None;

        assert!(some_value.ok_or_not_found("not found").is_ok());
        assert!(matches!(
            none_value.ok_or_not_found("not found"),
            Err(AppError::NotFound(_))
        ));
    }
}
