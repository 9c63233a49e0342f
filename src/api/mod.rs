//! # لایه API
//!
//! این ماژول HTTP handlers و routing رو مدیریت میکنه.
//!
//! ## ساختار URL‌ها:
//! - `POST /api/{kind}` - ثبت رکورد
//! - `GET /api/{kind}?offset=&limit=` - فهرست (حداکثر ۱۰۰)
//! - `GET /api/{kind}/:id` - خواندن یک رکورد
//! - `PUT /api/{kind}/:id` - ویرایش جزئی
//! - `DELETE /api/{kind}/:id` - حذف
//! - `GET /api/stats` - تعداد رکوردها
//! - `GET /health` - Health check
//!
//! که `{kind}` یکی از `professors`، `students` یا `courses` هست.

mod extractors;
mod handlers;

pub use extractors::*;
pub use handlers::*;

use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    database::{CourseRepository, Database, ProfessorRepository, RecordRepository, StudentRepository},
    models::Record,
    services::{AppState, RecordService},
};

// =====================================
// Router Builder
// =====================================
/// ساخت Router اصلی برنامه
///
/// # Arguments
/// * `db` - اتصال دیتابیس (migration‌ها اجرا شده)
pub fn create_router(db: Database) -> Router {
    let state = AppState::new(db);

    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Route‌های API
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(record_routes::<ProfessorRepository>())
        .merge(record_routes::<StudentRepository>())
        .merge(record_routes::<CourseRepository>())
        .route("/stats", get(handlers::stats::get_stats))
}

/// Route‌های CRUD یک نوع رکورد
///
/// مسیر مجموعه با و بدون `/` آخر ثبت میشه.
fn record_routes<R>() -> Router<AppState>
where
    R: RecordRepository,
    Arc<RecordService<R>>: FromRef<AppState>,
{
    use handlers::records::{create, get_one, list, remove, update};

    let collection = format!("/{}", <R::Record as Record>::KIND.table());

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(&format!("{collection}/"), get(list::<R>).post(create::<R>))
        .route(
            &format!("{collection}/:id"),
            get(get_one::<R>).put(update::<R>).delete(remove::<R>),
        )
}
