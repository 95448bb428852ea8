//! SeaORM entities

pub mod booking;
pub mod guest;
pub mod price_override;
pub mod property;
pub mod room;
pub mod room_blocked_date;
