//! Core business entities, rules and repository interfaces

pub mod booking;
pub mod daterange;
pub mod error;
pub mod guest;
pub mod pricing;
pub mod property;
pub mod repositories;
pub mod room;

// Re-export commonly used types
pub use booking::{generate_order_code, Booking, BookingStatus, NewBooking, PaymentMethod};
pub use error::{DomainError, DomainResult, FieldErrors, SlotConflict};
pub use guest::Guest;
pub use property::Property;
pub use repositories::RepositoryProvider;
pub use room::{OverrideKind, PriceOverride, Room, RoomBlockedDate};
