//! Create `customers` table.
//!
//! Holds guest contact details; `notes` is free text and never NULL.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(integer(Customers::Id).primary_key().auto_increment())
                    .col(string_len(Customers::FirstName, 64).not_null())
                    .col(string_len(Customers::LastName, 64).not_null())
                    .col(
                        ColumnDef::new(Customers::Phone)
                            .string_len(32)
                            .null(),
                    )
                    .col(text(Customers::Notes).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customers { Table, Id, FirstName, LastName, Phone, Notes }
