use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 campaign_activities 表（只追加的审计日志）
        manager
            .create_table(
                Table::create()
                    .table(CampaignActivity::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignActivity::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CampaignActivity::CampaignId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CampaignActivity::Action).string().not_null())
                    .col(ColumnDef::new(CampaignActivity::Details).text().not_null())
                    .col(
                        ColumnDef::new(CampaignActivity::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_activities_campaign")
                            .from(CampaignActivity::Table, CampaignActivity::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 analytics 表（外部集成写入的事件流）
        manager
            .create_table(
                Table::create()
                    .table(Analytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Analytics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Analytics::CampaignId).string().not_null())
                    .col(ColumnDef::new(Analytics::Platform).string().not_null())
                    .col(ColumnDef::new(Analytics::EventType).string().not_null())
                    .col(
                        ColumnDef::new(Analytics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_analytics_campaign")
                            .from(Analytics::Table, Analytics::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动日志按 campaign + 时间倒序分页
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activities_campaign_created")
                    .table(CampaignActivity::Table)
                    .col(CampaignActivity::CampaignId)
                    .col(CampaignActivity::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 分析查询按 campaign + 时间范围过滤
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_analytics_campaign_created")
                    .table(Analytics::Table)
                    .col(Analytics::CampaignId)
                    .col(Analytics::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_analytics_campaign_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_activities_campaign_created")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Analytics::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CampaignActivity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Campaign {
    #[sea_orm(iden = "campaigns")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum CampaignActivity {
    #[sea_orm(iden = "campaign_activities")]
    Table,
    Id,
    CampaignId,
    Action,
    Details,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Analytics {
    #[sea_orm(iden = "analytics")]
    Table,
    Id,
    CampaignId,
    Platform,
    EventType,
    CreatedAt,
}
