//! # سرویس رکوردها
//!
//! منطق ساخت، خواندن، ویرایش و حذف برای هر سه نوع رکورد. سرویس روی
//! repository generic هست، پس قوانین فقط یک بار نوشته شدن:
//!
//! 1. اعتبارسنجی فیلدها (`Validate`)
//! 2. قوانین بین‌فیلدی (`Record::cross_field_errors`)
//! 3. ذخیره در repository
//!
//! هیچ تغییری قبل از قبول شدن کامل رکورد در دیتابیس نوشته نمیشه.

use tracing::{debug, info, instrument};
use validator::Validate;

use crate::{
    database::RecordRepository,
    error::{AppError, OptionExt, Result},
    models::{PageParams, Record, RecordKind},
    validation::{self, FieldError},
};

/// خطاهای فیلدی یک مقدار، یا فهرست خالی
fn field_violations<V: Validate>(value: &V) -> Vec<FieldError> {
    match value.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => validation::field_errors(&errors),
    }
}

// =====================================
// Record Service
// =====================================
/// سرویس مدیریت یک نوع رکورد
#[derive(Debug, Clone)]
pub struct RecordService<R> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    #[must_use]
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// نوع رکوردی که این سرویس مدیریت میکنه
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        <R::Record as Record>::KIND
    }

    /// اعتبارسنجی کامل یک رکورد
    ///
    /// همه خطاها با هم برمیگردن، نه فقط اولی.
    ///
    /// # Errors
    /// `Validation` با فهرست فیلدهای نامعتبر
    pub fn check(&self, record: &R::Record) -> Result<()> {
        let mut errors = field_violations(record);
        let cross = record.cross_field_errors(&errors);
        errors.extend(cross);

        if errors.is_empty() {
            Ok(())
        } else {
            debug!(kind = %self.kind(), count = errors.len(), "Record rejected");
            Err(AppError::Validation(errors))
        }
    }

    /// ثبت رکورد جدید
    ///
    /// # Errors
    /// - `Validation`: فیلد نامعتبر
    /// - `DuplicateKey`: کلید اصلی تکراری
    /// - `DuplicateNationalId`: کد ملی تکراری (فقط استاد)
    #[instrument(skip(self, record), fields(kind = %self.kind(), id = %record.key()))]
    pub async fn create(&self, mut record: R::Record) -> Result<R::Record> {
        record.normalize_digits();
        self.check(&record)?;
        self.repo.insert(&record).await?;

        info!("Record created");
        Ok(record)
    }

    /// خواندن یک رکورد؛ نبودنش خطا نیست
    #[instrument(skip(self), fields(kind = %self.kind()))]
    pub async fn get(&self, id: &str) -> Result<Option<R::Record>> {
        self.repo.find(&validation::normalize_digits(id)).await
    }

    /// یک صفحه از رکوردها
    #[instrument(skip(self), fields(kind = %self.kind()))]
    pub async fn list(&self, page: PageParams) -> Result<Vec<R::Record>> {
        self.repo.list(page).await
    }

    /// ویرایش جزئی
    ///
    /// فقط فیلدهای موجود در patch عوض میشن. رکورد حاصل دوباره کامل
    /// بررسی میشه چون قانون بین‌فیلدی ممکنه با ترکیب جدید نقض بشه.
    ///
    /// # Errors
    /// - `Validation`: فیلد نامعتبر در patch یا ترکیب نامعتبر
    /// - `NotFound`: رکوردی با این کلید نیست
    /// - `DuplicateNationalId`: کد ملی مال استاد دیگه‌ایه
    #[instrument(skip(self, patch), fields(kind = %self.kind()))]
    pub async fn update(
        &self,
        id: &str,
        patch: <R::Record as Record>::Patch,
    ) -> Result<R::Record> {
        patch.validate()?;

        let mut record = self
            .repo
            .find(&validation::normalize_digits(id))
            .await?
            .ok_or_not_found(self.kind().not_found_message())?;

        record.apply(patch);
        record.normalize_digits();
        self.check(&record)?;
        self.repo.replace(&record).await?;

        info!("Record updated");
        Ok(record)
    }

    /// حذف؛ `false` یعنی رکوردی با این کلید نبود
    #[instrument(skip(self), fields(kind = %self.kind()))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self.repo.delete(&validation::normalize_digits(id)).await?;
        if deleted {
            info!("Record deleted");
        }
        Ok(deleted)
    }

    /// تعداد کل رکوردها
    pub async fn count(&self) -> Result<i64> {
        self.repo.count().await
    }
}
