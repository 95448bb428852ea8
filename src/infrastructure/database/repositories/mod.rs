//! SeaORM repository implementations

mod booking_repository;
mod guest_repository;
mod property_repository;
mod repository_provider;
mod room_repository;

pub use booking_repository::SeaOrmBookingRepository;
pub use guest_repository::SeaOrmGuestRepository;
pub use property_repository::SeaOrmPropertyRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use room_repository::SeaOrmRoomRepository;
