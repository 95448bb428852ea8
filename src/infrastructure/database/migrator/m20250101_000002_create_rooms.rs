//! Create rooms table

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rooms::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Rooms::PropertyId).string().not_null())
                    .col(ColumnDef::new(Rooms::Name).string().not_null())
                    .col(
                        ColumnDef::new(Rooms::BasePriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rooms::Capacity).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rooms_property")
                            .from(Rooms::Table, Rooms::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_property")
                    .table(Rooms::Table)
                    .col(Rooms::PropertyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rooms {
    Table,
    Id,
    PropertyId,
    Name,
    BasePriceCents,
    Capacity,
}
