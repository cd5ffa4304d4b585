//! Analytics event queries for CampaignStore
//!
//! Events are written by external platform integrations through
//! `record_event`; this service only reads and aggregates them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};

use super::CampaignStore;
use super::converters::model_to_analytics_event;
use crate::errors::Result;
use crate::storage::models::{AnalyticsEvent, Platform};

use migration::entities::analytics;

/// 分析事件过滤条件
#[derive(Default, Clone, Debug)]
pub struct AnalyticsFilter {
    /// 创建时间 >= start_date
    pub start_date: Option<DateTime<Utc>>,
    /// 创建时间 <= end_date
    pub end_date: Option<DateTime<Utc>>,
    /// 按平台过滤
    pub platform: Option<Platform>,
}

impl AnalyticsFilter {
    fn condition(&self, campaign_id: &str) -> Condition {
        let mut condition =
            Condition::all().add(analytics::Column::CampaignId.eq(campaign_id));

        if let Some(start) = self.start_date {
            condition = condition.add(analytics::Column::CreatedAt.gte(start));
        }
        if let Some(end) = self.end_date {
            condition = condition.add(analytics::Column::CreatedAt.lte(end));
        }
        if let Some(platform) = self.platform {
            condition = condition.add(analytics::Column::Platform.eq(platform.as_ref()));
        }

        condition
    }
}

/// 按事件类型分组的聚合结果
#[derive(Debug, FromQueryResult)]
struct EventTypeCount {
    event_type: String,
    count: i64,
}

impl CampaignStore {
    /// 过滤后的事件列表，按时间倒序
    pub async fn list_analytics(
        &self,
        campaign_id: &str,
        filter: &AnalyticsFilter,
    ) -> Result<Vec<AnalyticsEvent>> {
        let models = analytics::Entity::find()
            .filter(filter.condition(campaign_id))
            .order_by_desc(analytics::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(model_to_analytics_event).collect()
    }

    /// 按事件类型聚合计数（SQL GROUP BY，不把全量行拉到内存）
    pub async fn aggregate_analytics(
        &self,
        campaign_id: &str,
        filter: &AnalyticsFilter,
    ) -> Result<HashMap<String, u64>> {
        let rows = analytics::Entity::find()
            .select_only()
            .column(analytics::Column::EventType)
            .column_as(analytics::Column::Id.count(), "count")
            .filter(filter.condition(campaign_id))
            .group_by(analytics::Column::EventType)
            .into_model::<EventTypeCount>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.event_type, r.count.max(0) as u64))
            .collect())
    }

    /// 外部集成的事件写入口
    pub async fn record_event(
        &self,
        campaign_id: &str,
        platform: Platform,
        event_type: &str,
    ) -> Result<()> {
        let active = analytics::ActiveModel {
            id: NotSet,
            campaign_id: Set(campaign_id.to_string()),
            platform: Set(platform.as_ref().to_string()),
            event_type: Set(event_type.to_string()),
            created_at: Set(Utc::now()),
        };

        analytics::Entity::insert(active).exec(&self.db).await?;
        Ok(())
    }
}
