//! Property aggregate

mod model;
mod repository;

pub use model::Property;
pub use repository::PropertyRepository;
