//! Business logic and use cases

pub mod payments;
pub mod reservations;

pub use payments::{PaymentGateway, PaymentToken, UnconfiguredPaymentGateway};
pub use reservations::{
    AvailabilityChecker, AvailabilityReport, CreateBookingCommand, CreatedReservation,
    PaymentSetup, ReservationPolicy, ReservationService,
};
