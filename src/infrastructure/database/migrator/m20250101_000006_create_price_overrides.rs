//! Create price_overrides table

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
                    .table(PriceOverrides::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceOverrides::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PriceOverrides::RoomId).string().not_null())
                    .col(
                        ColumnDef::new(PriceOverrides::Kind)
                            .string()
                            .not_null()
                            .default("fixed_amount"),
                    )
                    .col(
                        ColumnDef::new(PriceOverrides::Value)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PriceOverrides::StartsOn).date().not_null())
                    .col(ColumnDef::new(PriceOverrides::EndsOn).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_overrides_room")
                            .from(PriceOverrides::Table, PriceOverrides::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_price_overrides_room")
                    .table(PriceOverrides::Table)
                    .col(PriceOverrides::RoomId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PriceOverrides::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PriceOverrides {
    Table,
    Id,
    RoomId,
    Kind,
    Value,
    StartsOn,
    EndsOn,
}
