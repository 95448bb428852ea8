//! Availability HTTP handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::reservations::ReservationService;
use crate::interfaces::http::common::{error_response, ApiResponse};

use super::dto::*;

/// Application state for availability handlers.
#[derive(Clone)]
pub struct AvailabilityAppState {
    pub service: Arc<ReservationService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/availability",
    tag = "Availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability report", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn check_availability(
    State(state): State<AvailabilityAppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<
    Json<ApiResponse<AvailabilityDto>>,
    (StatusCode, Json<ApiResponse<AvailabilityDto>>),
> {
    let report = state
        .service
        .check_availability(
            &query.property_id,
            &query.room_id,
            query.check_in,
            query.check_out,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(report.into())))
}
