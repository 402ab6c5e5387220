use actix_web::{get, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    fn now() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Utc::now(),
        }
    }
}

/// Liveness check, outside the session gate. Touches no storage.
#[get("/status")]
pub async fn health() -> web::Json<HealthStatus> {
    web::Json(HealthStatus::now())
}

/// Fallback for unknown paths, so they get the same `{"error": ...}` shape as every
/// other failure.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Resource not found" }))
}
