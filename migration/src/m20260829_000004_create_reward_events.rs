use sea_orm_migration::prelude::*;

use crate::m20260829_000001_create_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RewardEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RewardEvents::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RewardEvents::AccountId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardEvents::Source)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardEvents::ItemId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardEvents::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardEvents::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reward_events-account_id")
                            .from(RewardEvents::Table, RewardEvents::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-reward_events-account_id-created_at")
                    .table(RewardEvents::Table)
                    .col(RewardEvents::AccountId)
                    .col(RewardEvents::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RewardEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RewardEvents {
    Table,
    Id,
    AccountId,
    Source,
    ItemId,
    AmountCents,
    CreatedAt,
}
