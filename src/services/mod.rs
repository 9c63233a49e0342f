//! # ماژول سرویس‌ها (Business Logic Layer)
//!
//! ## لایه‌بندی معماری
//!
//! ```text
//! ┌─────────────────┐
//! │    API Layer    │  <-- HTTP handlers (axum)
//! ├─────────────────┤
//! │  Service Layer  │  <-- اعتبارسنجی و قوانین (اینجا!)
//! ├─────────────────┤
//! │ Repository Layer│  <-- Data access
//! ├─────────────────┤
//! │    Database     │  <-- SQLite
//! └─────────────────┘
//! ```

mod record_service;

pub use record_service::*;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    database::{CourseRepository, Database, ProfessorRepository, StudentRepository},
    error::Result,
    models::RecordStats,
};

pub type ProfessorService = RecordService<ProfessorRepository>;
pub type StudentService = RecordService<StudentRepository>;
pub type CourseService = RecordService<CourseRepository>;

// =====================================
// Application State
// =====================================
/// وضعیت مشترک بین همه handlers
///
/// `FromRef` باعث میشه هر handler فقط سرویسی که لازم داره رو بگیره.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub database: Database,
    pub professors: Arc<ProfessorService>,
    pub students: Arc<StudentService>,
    pub courses: Arc<CourseService>,
}

impl AppState {
    #[must_use]
    pub fn new(db: Database) -> Self {
        let professors = Arc::new(RecordService::new(ProfessorRepository::new(db.clone())));
        let students = Arc::new(RecordService::new(StudentRepository::new(db.clone())));
        let courses = Arc::new(RecordService::new(CourseRepository::new(db.clone())));

        Self {
            database: db,
            professors,
            students,
            courses,
        }
    }

    /// تعداد رکوردهای هر جدول
    pub async fn stats(&self) -> Result<RecordStats> {
        Ok(RecordStats {
            professors: self.professors.count().await?,
            students: self.students.count().await?,
            courses: self.courses.count().await?,
        })
    }
}
