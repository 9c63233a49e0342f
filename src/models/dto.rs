//! # Data Transfer Objects (DTOs)
//!
//! پاسخ‌های عمومی API که به نوع رکورد وابسته نیستن

use serde::{Deserialize, Serialize};

// =====================================
// Message Response
// =====================================
/// پاسخ متنی ساده، مثل `{"message": "Professor deleted"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// نتیجه خواندن یک رکورد
///
/// رکورد پیدا نشده خطا حساب نمیشه؛ بدنه پاسخ یه پیام «not found» هست.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    Missing(MessageResponse),
}

// =====================================
// Health Check
// =====================================
/// پاسخ health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,
}

impl HealthResponse {
    #[must_use]
    pub fn new(database_ok: bool) -> Self {
        Self {
            status: if database_ok { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database_ok,
        }
    }
}

// =====================================
// Statistics
// =====================================
/// تعداد رکوردهای هر جدول
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
    pub professors: i64,
    pub students: i64,
    pub courses: i64,
}
