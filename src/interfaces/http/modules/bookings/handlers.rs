//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::reservations::{PaymentSetup, ReservationService};
use crate::domain::DomainError;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<ReservationService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<CreateBookingResponse>),
        (status = 409, description = "Room unavailable for the requested dates"),
        (status = 422, description = "Invalid request fields"),
        (status = 400, description = "Guest limit or price mismatch"),
        (status = 404, description = "Guest, property or room not found")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<CreateBookingResponse>>),
    (StatusCode, Json<ApiResponse<CreateBookingResponse>>),
> {
    let command = request
        .into_command()
        .map_err(|errors| error_response(DomainError::Validation(errors)))?;

    let created = state.service.create(command).await.map_err(error_response)?;

    let booking = BookingDto::from(&created.booking);
    let (payment_token, warning) = match created.payment {
        PaymentSetup::ManualTransfer => (None, None),
        PaymentSetup::GatewayToken(token) => (Some(token.into()), None),
        PaymentSetup::GatewayUnavailable { reason } => (
            None,
            Some(format!(
                "We had trouble reaching the payment gateway ({}); your reservation is held and was switched to manual transfer",
                reason
            )),
        ),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreateBookingResponse {
            booking,
            payment_token,
            warning,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, (StatusCode, Json<ApiResponse<Vec<BookingDto>>>)>
{
    let bookings = state.service.list().await.map_err(error_response)?;
    let dtos: Vec<BookingDto> = bookings.iter().map(BookingDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state.service.get(&booking_id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(BookingDto::from(&booking))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking canceled", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Booking is not awaiting payment")
    )
)]
pub async fn cancel_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<ApiResponse<BookingDto>>, (StatusCode, Json<ApiResponse<BookingDto>>)> {
    let booking = state
        .service
        .cancel(&booking_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(BookingDto::from(&booking))))
}
