//! Guest aggregate

mod model;
mod repository;

pub use model::Guest;
pub use repository::GuestRepository;
