//! # Custom Extractors
//!
//! Extractor‌های سفارشی برای استخراج داده از request
//!
//! ## مفاهیم Rust + Axum:
//! - **FromRequest**: extractor‌ای که بدنه رو مصرف میکنه (باید آخرین پارامتر باشه)
//! - **FromRequestParts**: extractor‌ای که فقط به header/query نگاه میکنه
//! - **Rejection**: اینجا همیشه `AppError` تا شکل بدنه خطا یکسان بمونه

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::AppError,
    models::{FieldSet, PageParams},
    validation::{FieldError, RuleKind},
};

// =====================================
// Strict JSON Body
// =====================================
/// بدنه JSON که کلید ناشناخته قبول نمیکنه
///
/// اول بدنه به `serde_json::Value` خونده میشه، کلیدهاش با
/// `FieldSet::FIELDS` مقایسه میشن و بعد به `T` تبدیل میشه.
///
/// ```rust,ignore
/// async fn handler(StrictJson(course): StrictJson<Course>) -> ... {}
/// ```
#[derive(Debug, Clone)]
pub struct StrictJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned + FieldSet,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let Value::Object(map) = &value else {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let unknown: Vec<FieldError> = T::unknown_fields(map.keys())
            .into_iter()
            .map(|key| FieldError::new(key, RuleKind::UnknownField, "فیلد ناشناخته است."))
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::Validation(unknown));
        }

        serde_json::from_value(value)
            .map(StrictJson)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

// =====================================
// Pagination Query
// =====================================
/// `?offset=&limit=` با خطای هم‌شکل بقیه API
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQuery(pub PageParams);

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(page) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(PageQuery(page))
    }
}
