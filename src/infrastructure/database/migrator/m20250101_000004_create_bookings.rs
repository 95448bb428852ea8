//! Create bookings table
//!
//! Stores reservations with their payment hold deadline. Overlap safety
//! for concurrent creation comes from the overlap re-check inside the
//! insert transaction; on Postgres deployments an exclusion constraint
//! over (room_id, daterange(check_in, check_out)) restricted to
//! slot-holding statuses is a worthwhile additional guard, but is not
//! expressible portably here.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_properties::Properties;
use super::m20250101_000002_create_rooms::Rooms;
use super::m20250101_000003_create_guests::Guests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::OrderCode).string().not_null())
                    .col(ColumnDef::new(Bookings::GuestId).string().not_null())
                    .col(ColumnDef::new(Bookings::TenantId).string().not_null())
                    .col(ColumnDef::new(Bookings::PropertyId).string().not_null())
                    .col(ColumnDef::new(Bookings::RoomId).string().not_null())
                    .col(ColumnDef::new(Bookings::CheckIn).date().not_null())
                    .col(ColumnDef::new(Bookings::CheckOut).date().not_null())
                    .col(ColumnDef::new(Bookings::Nights).integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::PricePerNightCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::TotalAmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("waiting_payment"),
                    )
                    .col(
                        ColumnDef::new(Bookings::PaymentMethod)
                            .string()
                            .not_null()
                            .default("manual_transfer"),
                    )
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_room")
                            .from(Bookings::Table, Bookings::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_property")
                            .from(Bookings::Table, Bookings::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_guest")
                            .from(Bookings::Table, Bookings::GuestId)
                            .to(Guests::Table, Guests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_order_code")
                    .table(Bookings::Table)
                    .col(Bookings::OrderCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_room_status")
                    .table(Bookings::Table)
                    .col(Bookings::RoomId)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_expires")
                    .table(Bookings::Table)
                    .col(Bookings::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    OrderCode,
    GuestId,
    TenantId,
    PropertyId,
    RoomId,
    CheckIn,
    CheckOut,
    Nights,
    PricePerNightCents,
    TotalAmountCents,
    Status,
    PaymentMethod,
    CreatedAt,
    ExpiresAt,
}
