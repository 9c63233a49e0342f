//! # Record Handlers
//!
//! Handler‌های CRUD برای استاد، دانشجو و درس. همه generic روی repository
//! هستن و در router با نوع مشخص (مثلا `create::<ProfessorRepository>`)
//! ثبت میشن.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::extractors::{PageQuery, StrictJson},
    database::RecordRepository,
    error::Result,
    models::{Lookup, MessageResponse, Record},
    services::{AppState, RecordService},
};

type ServiceState<R> = State<Arc<RecordService<R>>>;
type Patch<R> = <<R as RecordRepository>::Record as Record>::Patch;

// =====================================
// Create
// =====================================
/// ثبت رکورد جدید
///
/// # Endpoint
/// `POST /api/{professors,students,courses}`
///
/// # Response
/// `201` با خود رکورد، یا `400` با `{"detail": ...}`
pub async fn create<R>(
    State(service): ServiceState<R>,
    StrictJson(record): StrictJson<R::Record>,
) -> Result<(StatusCode, Json<R::Record>)>
where
    R: RecordRepository,
    Arc<RecordService<R>>: FromRef<AppState>,
{
    let record = service.create(record).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

// =====================================
// Read
// =====================================
/// یک صفحه از رکوردها
///
/// # Endpoint
/// `GET /api/{kind}?offset=0&limit=100`
pub async fn list<R>(
    State(service): ServiceState<R>,
    PageQuery(page): PageQuery,
) -> Result<Json<Vec<R::Record>>>
where
    R: RecordRepository,
    Arc<RecordService<R>>: FromRef<AppState>,
{
    Ok(Json(service.list(page).await?))
}

/// خواندن یک رکورد
///
/// رکورد ناموجود `200` با `{"message": "<Kind> not found"}` برمیگردونه.
pub async fn get_one<R>(
    State(service): ServiceState<R>,
    Path(id): Path<String>,
) -> Result<Json<Lookup<R::Record>>>
where
    R: RecordRepository,
    Arc<RecordService<R>>: FromRef<AppState>,
{
    let lookup = match service.get(&id).await? {
        Some(record) => Lookup::Found(record),
        None => Lookup::Missing(MessageResponse::new(service.kind().not_found_message())),
    };
    Ok(Json(lookup))
}

// =====================================
// Update
// =====================================
/// ویرایش جزئی
///
/// # Endpoint
/// `PUT /api/{kind}/{id}`
///
/// # Response
/// `200` با رکورد ادغام‌شده، `400` برای خطای فیلد، `404` اگه رکورد نباشه
pub async fn update<R>(
    State(service): ServiceState<R>,
    Path(id): Path<String>,
    StrictJson(patch): StrictJson<Patch<R>>,
) -> Result<Json<R::Record>>
where
    R: RecordRepository,
    Arc<RecordService<R>>: FromRef<AppState>,
{
    Ok(Json(service.update(&id, patch).await?))
}

// =====================================
// Delete
// =====================================
/// حذف؛ تکرارش بی‌خطره
pub async fn remove<R>(
    State(service): ServiceState<R>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>>
where
    R: RecordRepository,
    Arc<RecordService<R>>: FromRef<AppState>,
{
    let kind = service.kind();
    let message = if service.delete(&id).await? {
        kind.deleted_message()
    } else {
        kind.not_found_message()
    };
    Ok(Json(MessageResponse::new(message)))
}
