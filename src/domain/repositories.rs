//! Repository provider interface
//!
//! One accessor per aggregate repository; implementations hold a single
//! connection pool behind the scenes.

use crate::domain::booking::BookingRepository;
use crate::domain::guest::GuestRepository;
use crate::domain::property::PropertyRepository;
use crate::domain::room::RoomRepository;

pub trait RepositoryProvider: Send + Sync {
    fn bookings(&self) -> &dyn BookingRepository;

    fn rooms(&self) -> &dyn RoomRepository;

    fn properties(&self) -> &dyn PropertyRepository;

    fn guests(&self) -> &dyn GuestRepository;
}
