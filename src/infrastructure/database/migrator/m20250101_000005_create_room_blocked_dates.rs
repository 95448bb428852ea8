//! Create room_blocked_dates table

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_rooms::Rooms;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoomBlockedDates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoomBlockedDates::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoomBlockedDates::RoomId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoomBlockedDates::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_blocked_dates_room")
                            .from(RoomBlockedDates::Table, RoomBlockedDates::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_room_blocked_dates_room_date")
                    .table(RoomBlockedDates::Table)
                    .col(RoomBlockedDates::RoomId)
                    .col(RoomBlockedDates::Date)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomBlockedDates::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RoomBlockedDates {
    Table,
    Id,
    RoomId,
    Date,
}
