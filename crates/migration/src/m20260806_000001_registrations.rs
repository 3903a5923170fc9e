use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registrations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Registrations::Name).string().not_null())
                    .col(ColumnDef::new(Registrations::Age).string().not_null())
                    .col(ColumnDef::new(Registrations::Gender).string().not_null())
                    .col(ColumnDef::new(Registrations::Address).string().not_null())
                    .col(ColumnDef::new(Registrations::Mobile).string().not_null())
                    .col(
                        ColumnDef::new(Registrations::PhoneVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Registrations::RegistrationNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrations::Status)
                            .string()
                            .not_null()
                            .default("registered"),
                    )
                    .col(ColumnDef::new(Registrations::CreatedAt).big_integer())
                    .to_owned(),
            )
            .await?;

        // Listing, gift rank and export all read in created-at order.
        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_created_at")
                    .table(Registrations::Table)
                    .col(Registrations::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let _ = manager
            .drop_index(
                Index::drop()
                    .name("idx_registrations_created_at")
                    .to_owned(),
            )
            .await;

        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Registrations {
    Table,
    Id,
    Name,
    Age,
    Gender,
    Address,
    Mobile,
    PhoneVerified,
    RegistrationNumber,
    Status,
    CreatedAt,
}
