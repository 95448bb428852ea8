//! Room aggregate: rooms, blocked dates, price overrides

mod model;
mod repository;

pub use model::{OverrideKind, PriceOverride, Room, RoomBlockedDate};
pub use repository::RoomRepository;
