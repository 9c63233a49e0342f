//! # ماژول دیتابیس (Database Layer)
//!
//! `Database` دسترسی به connection pool رو نگه میداره و به صورت صریح به
//! repository‌ها پاس داده میشه؛ هیچ handle سراسری نداریم. هر عملیات یک
//! اتصال از pool میگیره و آخر کار پسش میده.
//!
//! ## الگوهای طراحی:
//! - Repository Pattern: جداسازی لایه داده از منطق
//! - Connection Pool: مدیریت اتصالات دیتابیس

mod repository;

pub use repository::*;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
};

use crate::error::Result;

// migration‌ها موقع کامپایل داخل باینری embed میشن
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// حداکثر زمان انتظار برای قفل نوشتن SQLite
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

// =====================================
// Database Connection
// =====================================
/// اتصال به دیتابیس با Connection Pool
///
/// `Clone` فقط شمارنده‌ی `Arc` رو زیاد میکنه، pool کپی نمیشه.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// اتصال به دیتابیس
    ///
    /// اگه آدرس به فایل SQLite اشاره کنه، پوشه‌ی والدش ساخته میشه. نوشتن‌های
    /// همزمان تا `BUSY_TIMEOUT` منتظر قفل میمونن.
    ///
    /// # Arguments
    /// * `database_url` - آدرس دیتابیس (مثلا `sqlite://data/university.db?mode=rwc`)
    ///
    /// # Errors
    /// خطا برمیگردونه اگه ساخت پوشه یا اتصال موفق نباشه
    pub async fn connect(database_url: impl AsRef<str>) -> Result<Self> {
        let url = database_url.as_ref();

        if let Some(path) = url.strip_prefix("sqlite://") {
            // حذف query parameters
            let path = path.split('?').next().unwrap_or(path);
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// دیتابیس in-memory با جدول‌های ساخته‌شده (برای تست‌ها)
    ///
    /// `:memory:` برای هر اتصال یک دیتابیس جدا میسازه، پس pool فقط یک
    /// اتصال داره و اون اتصال هیچوقت بسته نمیشه.
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اتصال یا migration موفق نباشه
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self {
            pool: Arc::new(pool),
        };
        db.migrate().await?;

        Ok(db)
    }

    /// اجرای migration‌ها
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&*self.pool).await?;
        Ok(())
    }

    /// دسترسی به pool
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// بررسی سلامت دیتابیس
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }
}
