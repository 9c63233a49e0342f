//! # موتور قوانین اعتبارسنجی
//!
//! قوانین این ماژول توابع pure و بدون state هستن: یه مقدار میگیرن و یا
//! `Ok(())` برمیگردونن یا یه [`ValidationError`] با کد نوع خطا و پیام فارسی.
//!
//! همین توابع از طریق `#[validate(custom(...))]` روی رکوردها (در زمان ساخت)
//! و روی patch‌ها (در زمان ویرایش) صدا زده میشن، پس قانون هر فیلد فقط یک جا
//! تعریف شده.
//!
//! ## انواع خطا
//! - `invalid_format`: قالب نادرست (طول، ارقام، خط فارسی، پیش‌شماره)
//! - `invalid_enum`: مقدار خارج از فهرست مجاز
//! - `invalid_range`: عدد خارج از بازه
//! - `invalid_checksum`: کد ملی نامعتبر
//! - `unknown_field`: فیلد ناشناخته در بدنه درخواست

pub mod catalog;
mod rules;

pub use rules::*;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

// =====================================
// Rule Kinds
// =====================================
/// نوع خطای یک فیلد
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    InvalidFormat,
    InvalidEnum,
    InvalidRange,
    InvalidChecksum,
    UnknownField,
}

impl RuleKind {
    /// کد متنی که در `ValidationError::code` ذخیره میشه
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::InvalidEnum => "invalid_enum",
            Self::InvalidRange => "invalid_range",
            Self::InvalidChecksum => "invalid_checksum",
            Self::UnknownField => "unknown_field",
        }
    }

    /// برعکس [`RuleKind::code`]
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid_format" => Some(Self::InvalidFormat),
            "invalid_enum" => Some(Self::InvalidEnum),
            "invalid_range" => Some(Self::InvalidRange),
            "invalid_checksum" => Some(Self::InvalidChecksum),
            "unknown_field" => Some(Self::UnknownField),
            _ => None,
        }
    }
}

/// ساخت `ValidationError` با نوع و پیام
pub fn violation(kind: RuleKind, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(kind.code());
    error.message = Some(message.into());
    error
}

// =====================================
// Field Errors
// =====================================
/// خطای یک فیلد به شکلی که به کلاینت برمیگرده
///
/// ```json
/// {"loc": ["body", "national_id"], "msg": "کد ملی وارد شده نامعتبر است.", "type": "invalid_checksum"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: RuleKind,
}

impl FieldError {
    /// خطای یک فیلد از بدنه درخواست
    pub fn new(field: impl Into<String>, kind: RuleKind, msg: impl Into<String>) -> Self {
        Self {
            loc: vec!["body".to_string(), field.into()],
            msg: msg.into(),
            kind,
        }
    }

    /// تبدیل خطای یک قانون به خطای فیلد
    #[must_use]
    pub fn from_violation(field: &str, error: &ValidationError) -> Self {
        let kind = RuleKind::from_code(&error.code).unwrap_or(RuleKind::InvalidFormat);
        let msg = error
            .message
            .as_ref()
            .map_or_else(|| error.code.to_string(), ToString::to_string);

        Self::new(field, kind, msg)
    }

    /// نام فیلد (آخرین جزء `loc`)
    #[must_use]
    pub fn field(&self) -> &str {
        self.loc.last().map_or("", String::as_str)
    }
}

/// پهن کردن `ValidationErrors` به فهرست خطای فیلدها
///
/// خروجی بر اساس نام فیلد مرتب میشه تا ترتیبش به HashMap وابسته نباشه.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut list: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(move |err| FieldError::from_violation(&field, err))
                .collect::<Vec<_>>()
        })
        .collect();

    list.sort_by(|a, b| a.field().cmp(b.field()));
    list
}
