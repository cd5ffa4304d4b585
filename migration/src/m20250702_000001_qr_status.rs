//! Adds an explicit QR provisioning sub-state to campaigns.
//!
//! A nullable qr_code_url alone cannot distinguish "not provisioned yet"
//! from "provisioning failed, retry later", so the state gets its own
//! column. Existing rows with a QR are backfilled to READY.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Campaign::Table)
                    .add_column(
                        ColumnDef::new(Campaign::QrStatus)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .to_owned(),
            )
            .await?;

        // 已有二维码的行回填为 READY
        manager
            .exec_stmt(
                Query::update()
                    .table(Campaign::Table)
                    .value(Campaign::QrStatus, "READY")
                    .and_where(Expr::col(Campaign::QrCodeUrl).is_not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Campaign::Table)
                    .drop_column(Campaign::QrStatus)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Campaign {
    #[sea_orm(iden = "campaigns")]
    Table,
    QrCodeUrl,
    QrStatus,
}
