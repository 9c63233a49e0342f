//! # University Records Library
//!
//! نگهداری و اعتبارسنجی رکوردهای استاد، دانشجو و درس.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه
//! ├── main.rs         # نقطه ورود باینری
//! ├── config/         # مدیریت تنظیمات
//! ├── error/          # تعریف خطاها
//! ├── validation/     # قوانین فیلدها (کد ملی، تاریخ، تلفن، ...)
//! ├── database/       # لایه دیتابیس
//! ├── models/         # مدل‌های داده
//! ├── services/       # منطق کسب‌وکار
//! └── api/            # لایه API
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust,no_run
//! use uni_records::{config::Config, database::Database};
//!
//! #[tokio::main]
//! async fn main() -> uni_records::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url).await?;
//!     db.migrate().await?;
//!     Ok(())
//! }
//! ```

// =====================================
// Module Declarations
// =====================================

/// ماژول مدیریت تنظیمات برنامه
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// قوانین اعتبارسنجی فیلدها
pub mod validation;

/// ماژول ارتباط با دیتابیس
pub mod database;

/// ماژول مدل‌های داده (Domain Models)
pub mod models;

/// ماژول سرویس‌ها (Business Logic)
pub mod services;

/// ماژول API و HTTP Handlers
pub mod api;

// =====================================
// Re-exports
// =====================================

/// نتیجه عملیات با خطای سفارشی ما
pub use error::Result;

/// خطای اصلی برنامه
pub use error::AppError;

// =====================================
// Prelude Module
// =====================================
/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
///
/// ```rust
/// use uni_records::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::database::{Database, RecordRepository};
    pub use crate::error::{AppError, Result};
    pub use crate::models::*;
    pub use crate::services::*;
}
