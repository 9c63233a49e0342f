//! # ماژول مدل‌ها (Domain Models)
//!
//! سه نوع رکورد داریم: استاد، دانشجو و درس. هر کدوم:
//! - یه struct کامل که در دیتابیس ذخیره میشه (`FromRow`) و از API میاد
//! - یه Patch که همه فیلدهاش اختیاریه و برای ویرایش استفاده میشه
//!
//! قوانین اعتبارسنجی با `#[derive(Validate)]` به فیلدها وصل شدن و
//! پیاده‌سازیشون در [`crate::validation`] هست.

mod course;
mod dto;
mod professor;
mod student;

pub use course::*;
pub use dto::*;
pub use professor::*;
pub use student::*;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

use crate::validation::{self, FieldError};

// =====================================
// Record Kind
// =====================================
/// نوع رکورد
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Professor,
    Student,
    Course,
}

impl RecordKind {
    /// نام جدول در دیتابیس (و مسیر در API)
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            Self::Professor => "professors",
            Self::Student => "students",
            Self::Course => "courses",
        }
    }

    /// نام نمایشی در پیام‌ها
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Professor => "Professor",
            Self::Student => "Student",
            Self::Course => "Course",
        }
    }

    #[must_use]
    pub fn not_found_message(self) -> String {
        format!("{} not found", self.label())
    }

    #[must_use]
    pub fn deleted_message(self) -> String {
        format!("{} deleted", self.label())
    }

    /// پیام فارسی کلید اصلی تکراری
    #[must_use]
    pub fn duplicate_key_message(self) -> &'static str {
        match self {
            Self::Professor => "کد استاد قبلاً ثبت شده است.",
            Self::Student => "شماره دانشجویی قبلاً ثبت شده است.",
            Self::Course => "کد درس قبلاً ثبت شده است.",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =====================================
// Field Set (deny-list at the boundary)
// =====================================
/// فهرست صریح فیلدهای مجاز یک payload
///
/// extractor `StrictJson` هر کلیدی که اینجا نباشه رو رد میکنه.
pub trait FieldSet {
    const FIELDS: &'static [&'static str];

    /// فیلدهای ناشناخته‌ی یک شیء JSON
    fn unknown_fields<'a>(keys: impl IntoIterator<Item = &'a String>) -> Vec<&'a str> {
        keys.into_iter()
            .map(String::as_str)
            .filter(|key| !Self::FIELDS.contains(key))
            .collect()
    }
}

// =====================================
// Record Trait
// =====================================
/// رفتار مشترک سه نوع رکورد
///
/// # مفاهیم:
/// - Associated const و type: هر رکورد نوع و Patch خودش رو داره
/// - متد پیش‌فرض: قانون بین‌فیلدی فقط جایی که لازمه override میشه
pub trait Record:
    Validate + FieldSet + Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + Unpin + 'static
{
    const KIND: RecordKind;

    type Patch: Validate + FieldSet + DeserializeOwned + std::fmt::Debug + Send + Sync + 'static;

    /// کلید اصلی
    fn key(&self) -> &str;

    /// اعمال فیلدهای موجود در patch؛ بقیه دست‌نخورده میمونن
    fn apply(&mut self, patch: Self::Patch);

    /// تبدیل ارقام فارسی و عربی فیلدهای عددی به ASCII
    ///
    /// رکورد همیشه با ارقام ASCII ذخیره میشه تا کلید اصلی و `UNIQUE` کد ملی
    /// به شکل نوشتن ارقام وابسته نباشن.
    fn normalize_digits(&mut self);

    /// قوانینی که به بیش از یک فیلد وابسته‌ان
    ///
    /// روی رکورد کامل (بعد از اعمال patch) اجرا میشه. `already_failed`
    /// فیلدهایی هستن که قبلا خطا گرفتن تا خطای تکراری گزارش نشه.
    fn cross_field_errors(&self, _already_failed: &[FieldError]) -> Vec<FieldError> {
        Vec::new()
    }
}

/// نسخه‌ی درجا از [`validation::normalize_digits`]
pub(crate) fn normalize_field(value: &mut String) {
    if !value.is_ascii() {
        *value = validation::normalize_digits(value).into_owned();
    }
}

// =====================================
// Pagination
// =====================================
/// سقف تعداد رکورد در هر صفحه
pub const MAX_PAGE_SIZE: u32 = 100;

/// پارامترهای صفحه‌بندی (`?offset=0&limit=100`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub offset: u32,

    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    MAX_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: MAX_PAGE_SIZE,
        }
    }
}

impl PageParams {
    #[must_use]
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// limit با سقف ۱۰۰
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.min(MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_limit_is_capped() {
        assert_eq!(PageParams::new(0, 150).limit(), 100);
        assert_eq!(PageParams::new(0, 20).limit(), 20);
        assert_eq!(PageParams::default().limit(), 100);
    }

    #[test]
    fn test_page_params_defaults_from_json() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_record_kind_messages() {
        assert_eq!(RecordKind::Professor.not_found_message(), "Professor not found");
        assert_eq!(RecordKind::Course.deleted_message(), "Course deleted");
        assert_eq!(RecordKind::Student.table(), "students");
    }
}
