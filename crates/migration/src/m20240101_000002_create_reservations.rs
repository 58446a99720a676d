//! Create `reservations` table with FK to `customers`.
//!
//! One row per party booking; a reservation always belongs to a customer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(integer(Reservations::Id).primary_key().auto_increment())
                    .col(integer(Reservations::CustomerId).not_null())
                    .col(integer(Reservations::NumGuests).not_null())
                    .col(timestamp_with_time_zone(Reservations::StartAt).not_null())
                    .col(text(Reservations::Notes).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_customer")
                            .from(Reservations::Table, Reservations::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reservations::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reservations { Table, Id, CustomerId, NumGuests, StartAt, Notes }

#[derive(DeriveIden)]
enum Customers { Table, Id }
