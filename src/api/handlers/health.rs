//! # Health Check Handler
//!
//! برای بررسی سلامت سرویس

use axum::{extract::State, Json};
use tracing::warn;

use crate::{database::Database, models::HealthResponse};

/// بررسی سلامت سرویس و اتصال دیتابیس
///
/// # Endpoint
/// `GET /health`
///
/// # Response
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": true
/// }
/// ```
pub async fn health_check(State(database): State<Database>) -> Json<HealthResponse> {
    let db_ok = match database.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse::new(db_ok))
}
