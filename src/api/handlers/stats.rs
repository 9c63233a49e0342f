//! # Stats Handler

use axum::{extract::State, Json};

use crate::{error::Result, models::RecordStats, services::AppState};

/// تعداد رکوردهای هر جدول
///
/// # Endpoint
/// `GET /api/stats`
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<RecordStats>> {
    Ok(Json(state.stats().await?))
}
