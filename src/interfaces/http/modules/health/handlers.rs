//! Health check handler

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::interfaces::http::common::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthStatus>)
    )
)]
pub async fn health_check() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
