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
                    .table(OtpChallenges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OtpChallenges::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OtpChallenges::Mobile).string().not_null())
                    .col(
                        ColumnDef::new(OtpChallenges::CodeHash)
                            .var_binary(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OtpChallenges::Salt).var_binary(64).not_null())
                    .col(
                        ColumnDef::new(OtpChallenges::Consumed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(OtpChallenges::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtpChallenges::ExpiresAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_otp_challenges_mobile")
                    .table(OtpChallenges::Table)
                    .col(OtpChallenges::Mobile)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let _ = manager
            .drop_index(Index::drop().name("idx_otp_challenges_mobile").to_owned())
            .await;

        manager
            .drop_table(Table::drop().table(OtpChallenges::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OtpChallenges {
    Table,
    Id,
    Mobile,
    CodeHash,
    Salt,
    Consumed,
    CreatedAt,
    ExpiresAt,
}
