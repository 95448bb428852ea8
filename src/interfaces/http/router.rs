//! API Router with Swagger UI

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::reservations::ReservationService;

use super::modules::{availability, bookings, health};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Availability
        availability::handlers::check_availability,
        // Bookings
        bookings::handlers::create_booking,
        bookings::handlers::list_bookings,
        bookings::handlers::get_booking,
        bookings::handlers::cancel_booking,
    ),
    tags(
        (name = "Availability", description = "Room availability queries"),
        (name = "Bookings", description = "Reservation creation and lifecycle"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Build the REST API router around an explicitly injected service.
pub fn create_api_router(service: Arc<ReservationService>) -> Router {
    let availability_routes = Router::new()
        .route(
            "/availability",
            get(availability::handlers::check_availability),
        )
        .with_state(availability::AvailabilityAppState {
            service: service.clone(),
        });

    let booking_routes = Router::new()
        .route(
            "/bookings",
            axum::routing::post(bookings::handlers::create_booking)
                .get(bookings::handlers::list_bookings),
        )
        .route(
            "/bookings/{booking_id}",
            get(bookings::handlers::get_booking).delete(bookings::handlers::cancel_booking),
        )
        .with_state(bookings::BookingAppState { service });

    let health_routes = Router::new().route("/health", get(health::handlers::health_check));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/api/v1",
            availability_routes.merge(booking_routes).merge(health_routes),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
