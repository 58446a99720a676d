use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Customers: listing and search both order by (last_name, first_name)
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_last_first")
                    .table(Customers::Table)
                    .col(Customers::LastName)
                    .col(Customers::FirstName)
                    .to_owned(),
            )
            .await?;

        // Reservations: customer-scoped lookups and the ranking join
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_customer")
                    .table(Reservations::Table)
                    .col(Reservations::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Reservations: customer timelines order by start_at
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_start_at")
                    .table(Reservations::Table)
                    .col(Reservations::StartAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_customer_last_first").table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservation_customer").table(Reservations::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservation_start_at").table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customers { Table, FirstName, LastName }

#[derive(DeriveIden)]
enum Reservations { Table, CustomerId, StartAt }
