//! Reservation use cases: availability, booking workflow, expiry sweep

mod availability;
mod expiry;
mod service;

pub use availability::{AvailabilityChecker, AvailabilityReport};
pub use expiry::start_expiry_sweeper;
pub use service::{
    CreateBookingCommand, CreatedReservation, PaymentSetup, ReservationPolicy, ReservationService,
};
