//! Create guests table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Guests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Guests::FullName).string().not_null())
                    .col(ColumnDef::new(Guests::Email).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Guests {
    Table,
    Id,
    FullName,
    Email,
}
