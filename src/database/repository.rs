//! # Repository Pattern
//!
//! برای هر نوع رکورد یک repository داریم. خوندن، فهرست، حذف و شمارش برای
//! هر سه یکسانه و با توابع generic این فایل انجام میشه؛ درج و جایگزینی
//! ستون‌های خودشون رو دارن.
//!
//! تکراری بودن کلید اصلی و کد ملی استاد با constraint‌های جدول
//! (`PRIMARY KEY` و `UNIQUE`) تشخیص داده میشه. هر درج یک دستور autocommit
//! هست، پس درخواست‌های همزمان پشت قفل نوشتن SQLite صف میکشن و یکیشون
//! خطای تکراری میگیره.
//!
//! ## مفاهیم Rust:
//! - **async_trait**: امکان async در traits
//! - **Associated Types**: هر repository نوع رکورد خودش رو داره
//! - **Higher-Ranked Trait Bounds**: `for<'r> FromRow<'r, SqliteRow>`

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, FromRow};
use tracing::warn;

use super::Database;
use crate::error::{AppError, Result};
use crate::models::{Course, PageParams, Professor, Record, RecordKind, Student};

// =====================================
// Base Repository Trait
// =====================================
/// ذخیره‌سازی کلیددار یک نوع رکورد
#[async_trait]
pub trait RecordRepository: Send + Sync + 'static {
    /// نوع رکوردی که این repository باهاش کار میکنه
    type Record: Record;

    /// پیدا کردن با کلید اصلی
    async fn find(&self, id: &str) -> Result<Option<Self::Record>>;

    /// یک صفحه از رکوردها به ترتیب ذخیره‌سازی
    async fn list(&self, page: PageParams) -> Result<Vec<Self::Record>>;

    /// درج رکورد جدید
    ///
    /// # Errors
    /// `DuplicateKey` اگه کلید اصلی موجود باشه
    async fn insert(&self, record: &Self::Record) -> Result<()>;

    /// بازنویسی کامل یک رکورد موجود
    ///
    /// # Errors
    /// `NotFound` اگه ردیف دیگه وجود نداشته باشه
    async fn replace(&self, record: &Self::Record) -> Result<()>;

    /// حذف با کلید اصلی؛ `true` یعنی ردیفی حذف شد
    async fn delete(&self, id: &str) -> Result<bool>;

    /// شمارش کل
    async fn count(&self) -> Result<i64>;
}

// =====================================
// Shared Queries
// =====================================
// نام جدول از RecordKind میاد و هیچوقت از ورودی کاربر ساخته نمیشه

async fn find_row<T>(db: &Database, kind: RecordKind, id: &str) -> Result<Option<T>>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let sql = format!("SELECT * FROM {} WHERE id = ?", kind.table());
    let row = sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(db.pool())
        .await?;

    Ok(row)
}

async fn list_rows<T>(db: &Database, kind: RecordKind, page: PageParams) -> Result<Vec<T>>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let sql = format!(
        "SELECT * FROM {} ORDER BY rowid LIMIT ? OFFSET ?",
        kind.table()
    );
    let rows = sqlx::query_as::<_, T>(&sql)
        .bind(i64::from(page.limit()))
        .bind(i64::from(page.offset()))
        .fetch_all(db.pool())
        .await?;

    Ok(rows)
}

async fn delete_row(db: &Database, kind: RecordKind, id: &str) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
    let result = sqlx::query(&sql).bind(id).execute(db.pool()).await?;

    Ok(result.rows_affected() > 0)
}

async fn count_rows(db: &Database, kind: RecordKind) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
    let count = sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(db.pool())
        .await?;

    Ok(count)
}

/// تبدیل خطای UNIQUE دیتابیس به خطای دامنه
///
/// SQLite ستون نقض‌شده رو در پیام میاره
/// (`UNIQUE constraint failed: professors.national_id`).
fn map_conflict(err: sqlx::Error, kind: RecordKind, id: &str, national_id: Option<&str>) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match national_id {
                Some(nid) if db_err.message().contains("national_id") => {
                    warn!(kind = %kind, id = %id, "Rejected duplicate national ID");
                    AppError::DuplicateNationalId(nid.to_string())
                }
                _ => {
                    warn!(kind = %kind, id = %id, "Rejected duplicate primary key");
                    AppError::DuplicateKey {
                        kind,
                        id: id.to_string(),
                    }
                }
            };
        }
    }
    err.into()
}

// =====================================
// Professor Repository
// =====================================
/// Repository استادها
///
/// تنها جایی که یکتا بودن کد ملی چک میشه.
#[derive(Debug, Clone)]
pub struct ProfessorRepository {
    db: Database,
}

impl ProfessorRepository {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordRepository for ProfessorRepository {
    type Record = Professor;

    async fn find(&self, id: &str) -> Result<Option<Professor>> {
        find_row(&self.db, RecordKind::Professor, id).await
    }

    async fn list(&self, page: PageParams) -> Result<Vec<Professor>> {
        list_rows(&self.db, RecordKind::Professor, page).await
    }

    async fn insert(&self, p: &Professor) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO professors (id, first_name, last_name, national_id, department, major,
                                    birth_date, born_city, address, postal_code,
                                    mobile_phone, landline_phone, course_ids)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&p.id)
        .bind(&p.first_name)
        .bind(&p.last_name)
        .bind(&p.national_id)
        .bind(&p.department)
        .bind(&p.major)
        .bind(&p.birth_date)
        .bind(&p.born_city)
        .bind(&p.address)
        .bind(&p.postal_code)
        .bind(&p.mobile_phone)
        .bind(&p.landline_phone)
        .bind(&p.course_ids)
        .execute(self.db.pool())
        .await
        .map_err(|e| map_conflict(e, RecordKind::Professor, &p.id, Some(&p.national_id)))?;

        Ok(())
    }

    /// نگه داشتن کد ملی خود استاد مجازه؛ کد ملی استاد دیگه `UNIQUE` رو نقض میکنه
    async fn replace(&self, p: &Professor) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE professors
            SET first_name = ?, last_name = ?, national_id = ?, department = ?, major = ?,
                birth_date = ?, born_city = ?, address = ?, postal_code = ?,
                mobile_phone = ?, landline_phone = ?, course_ids = ?
            WHERE id = ?
            "#,
        )
        .bind(&p.first_name)
        .bind(&p.last_name)
        .bind(&p.national_id)
        .bind(&p.department)
        .bind(&p.major)
        .bind(&p.birth_date)
        .bind(&p.born_city)
        .bind(&p.address)
        .bind(&p.postal_code)
        .bind(&p.mobile_phone)
        .bind(&p.landline_phone)
        .bind(&p.course_ids)
        .bind(&p.id)
        .execute(self.db.pool())
        .await
        .map_err(|e| map_conflict(e, RecordKind::Professor, &p.id, Some(&p.national_id)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::record_not_found(RecordKind::Professor));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        delete_row(&self.db, RecordKind::Professor, id).await
    }

    async fn count(&self) -> Result<i64> {
        count_rows(&self.db, RecordKind::Professor).await
    }
}

// =====================================
// Student Repository
// =====================================
/// Repository دانشجوها
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: Database,
}

impl StudentRepository {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordRepository for StudentRepository {
    type Record = Student;

    async fn find(&self, id: &str) -> Result<Option<Student>> {
        find_row(&self.db, RecordKind::Student, id).await
    }

    async fn list(&self, page: PageParams) -> Result<Vec<Student>> {
        list_rows(&self.db, RecordKind::Student, page).await
    }

    async fn insert(&self, s: &Student) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO students (id, first_name, last_name, father_name, birth_date,
                                  id_serial_number, id_serial_letter, id_serial_code,
                                  born_city, address, postal_code, mobile_phone, landline_phone,
                                  department, marital_status, national_id, major,
                                  course_ids, lecturer_ids)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&s.id)
        .bind(&s.first_name)
        .bind(&s.last_name)
        .bind(&s.father_name)
        .bind(&s.birth_date)
        .bind(&s.id_serial_number)
        .bind(&s.id_serial_letter)
        .bind(&s.id_serial_code)
        .bind(&s.born_city)
        .bind(&s.address)
        .bind(&s.postal_code)
        .bind(&s.mobile_phone)
        .bind(&s.landline_phone)
        .bind(&s.department)
        .bind(&s.marital_status)
        .bind(&s.national_id)
        .bind(&s.major)
        .bind(&s.course_ids)
        .bind(&s.lecturer_ids)
        .execute(self.db.pool())
        .await
        .map_err(|e| map_conflict(e, RecordKind::Student, &s.id, None))?;

        Ok(())
    }

    async fn replace(&self, s: &Student) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE students
            SET first_name = ?, last_name = ?, father_name = ?, birth_date = ?,
                id_serial_number = ?, id_serial_letter = ?, id_serial_code = ?,
                born_city = ?, address = ?, postal_code = ?, mobile_phone = ?,
                landline_phone = ?, department = ?, marital_status = ?, national_id = ?,
                major = ?, course_ids = ?, lecturer_ids = ?
            WHERE id = ?
            "#,
        )
        .bind(&s.first_name)
        .bind(&s.last_name)
        .bind(&s.father_name)
        .bind(&s.birth_date)
        .bind(&s.id_serial_number)
        .bind(&s.id_serial_letter)
        .bind(&s.id_serial_code)
        .bind(&s.born_city)
        .bind(&s.address)
        .bind(&s.postal_code)
        .bind(&s.mobile_phone)
        .bind(&s.landline_phone)
        .bind(&s.department)
        .bind(&s.marital_status)
        .bind(&s.national_id)
        .bind(&s.major)
        .bind(&s.course_ids)
        .bind(&s.lecturer_ids)
        .bind(&s.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::record_not_found(RecordKind::Student));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        delete_row(&self.db, RecordKind::Student, id).await
    }

    async fn count(&self) -> Result<i64> {
        count_rows(&self.db, RecordKind::Student).await
    }
}

// =====================================
// Course Repository
// =====================================
/// Repository درس‌ها
#[derive(Debug, Clone)]
pub struct CourseRepository {
    db: Database,
}

impl CourseRepository {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordRepository for CourseRepository {
    type Record = Course;

    async fn find(&self, id: &str) -> Result<Option<Course>> {
        find_row(&self.db, RecordKind::Course, id).await
    }

    async fn list(&self, page: PageParams) -> Result<Vec<Course>> {
        list_rows(&self.db, RecordKind::Course, page).await
    }

    async fn insert(&self, c: &Course) -> Result<()> {
        sqlx::query("INSERT INTO courses (id, name, credits, department) VALUES (?, ?, ?, ?)")
            .bind(&c.id)
            .bind(&c.name)
            .bind(c.credits)
            .bind(&c.department)
            .execute(self.db.pool())
            .await
            .map_err(|e| map_conflict(e, RecordKind::Course, &c.id, None))?;

        Ok(())
    }

    async fn replace(&self, c: &Course) -> Result<()> {
        let result =
            sqlx::query("UPDATE courses SET name = ?, credits = ?, department = ? WHERE id = ?")
                .bind(&c.name)
                .bind(c.credits)
                .bind(&c.department)
                .bind(&c.id)
                .execute(self.db.pool())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::record_not_found(RecordKind::Course));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        delete_row(&self.db, RecordKind::Course, id).await
    }

    async fn count(&self) -> Result<i64> {
        count_rows(&self.db, RecordKind::Course).await
    }
}
