//! Booking aggregate: entity, validation, repository interface

mod model;
mod repository;
pub mod validator;

pub use model::{
    generate_order_code, Booking, BookingStatus, NewBooking, PaymentMethod,
};
pub use repository::BookingRepository;
