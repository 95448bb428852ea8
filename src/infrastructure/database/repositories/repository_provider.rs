//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::guest::GuestRepository;
use crate::domain::property::PropertyRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::RoomRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::guest_repository::SeaOrmGuestRepository;
use super::property_repository::SeaOrmPropertyRepository;
use super::room_repository::SeaOrmRoomRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_id("room-1").await?;
/// let holds = repos.bookings().find_overlapping("room-1", check_in, check_out).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    bookings: SeaOrmBookingRepository,
    rooms: SeaOrmRoomRepository,
    properties: SeaOrmPropertyRepository,
    guests: SeaOrmGuestRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            bookings: SeaOrmBookingRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            properties: SeaOrmPropertyRepository::new(db.clone()),
            guests: SeaOrmGuestRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn properties(&self) -> &dyn PropertyRepository {
        &self.properties
    }

    fn guests(&self) -> &dyn GuestRepository {
        &self.guests
    }
}
