//! # HTTP Handlers
//!
//! در axum، هر handler یک async function هست که extractor‌ها رو به عنوان
//! پارامتر میگیره و چیزی برمیگردونه که `IntoResponse` باشه.

pub mod health;
pub mod records;
pub mod stats;
