//! Query operations for CampaignStore
//!
//! This module contains all read-only database operations.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::{CampaignFilter, CampaignStore};
use super::converters::{
    model_to_activity, model_to_campaign, model_to_config, model_to_user,
};
use crate::errors::Result;
use crate::storage::models::{ActivityEntry, Campaign, CampaignConfig, CampaignDetails, UserRef};

use migration::entities::{analytics, campaign, campaign_activity, campaign_config, user};

/// 按 campaign 分组的计数查询结果
#[derive(Debug, FromQueryResult)]
struct CountByCampaign {
    campaign_id: String,
    count: i64,
}

impl CampaignStore {
    pub async fn get_campaign(&self, id: &str) -> Result<Option<Campaign>> {
        let model = campaign::Entity::find_by_id(id).one(&self.db).await?;
        model.map(model_to_campaign).transpose()
    }

    pub async fn get_config(&self, campaign_id: &str) -> Result<Option<CampaignConfig>> {
        let model = campaign_config::Entity::find_by_id(campaign_id)
            .one(&self.db)
            .await?;
        model.map(model_to_config).transpose()
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<UserRef>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(model_to_user))
    }

    pub async fn count_activities(&self, campaign_id: &str) -> Result<u64> {
        let count = campaign_activity::Entity::find()
            .filter(campaign_activity::Column::CampaignId.eq(campaign_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    pub async fn count_analytics(&self, campaign_id: &str) -> Result<u64> {
        let count = analytics::Entity::find()
            .filter(analytics::Column::CampaignId.eq(campaign_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// 单个活动的聚合视图：活动 + 配置 + 创建人 + 计数
    pub async fn get_campaign_details(&self, id: &str) -> Result<Option<CampaignDetails>> {
        let Some(campaign) = self.get_campaign(id).await? else {
            return Ok(None);
        };

        let config = self.get_config(id).await?;
        let user = self.get_user(&campaign.created_by).await?;
        let activity_count = self.count_activities(id).await?;
        let analytics_count = self.count_analytics(id).await?;

        Ok(Some(CampaignDetails {
            campaign,
            config,
            user,
            activity_count,
            analytics_count,
        }))
    }

    /// 带过滤条件的分页活动列表，按创建时间倒序
    ///
    /// 返回 (当前页的聚合视图, 过滤后的总数)。
    pub async fn list_campaigns(
        &self,
        page: u64,
        limit: u64,
        filter: CampaignFilter,
    ) -> Result<(Vec<CampaignDetails>, u64)> {
        let mut condition = Condition::all();

        if let Some(status) = filter.status {
            condition = condition.add(campaign::Column::Status.eq(status.as_ref()));
        }

        // search: 模糊匹配 name / brand_name / description
        if let Some(ref search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(campaign::Column::Name.contains(search))
                    .add(campaign::Column::BrandName.contains(search))
                    .add(campaign::Column::Description.contains(search)),
            );
        }

        let total = campaign::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let page_offset = page.saturating_sub(1);
        let models = campaign::Entity::find()
            .filter(condition)
            .order_by_desc(campaign::Column::CreatedAt)
            .paginate(&self.db, limit)
            .fetch_page(page_offset)
            .await?;

        let campaigns = models
            .into_iter()
            .map(model_to_campaign)
            .collect::<Result<Vec<_>>>()?;

        if campaigns.is_empty() {
            return Ok((Vec::new(), total));
        }

        // 批量取当前页的配置 / 创建人 / 计数，避免逐行查询
        let ids: Vec<String> = campaigns.iter().map(|c| c.id.clone()).collect();
        let user_ids: Vec<String> = campaigns.iter().map(|c| c.created_by.clone()).collect();

        let mut configs: HashMap<String, CampaignConfig> = campaign_config::Entity::find()
            .filter(campaign_config::Column::CampaignId.is_in(ids.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| model_to_config(m).map(|c| (c.campaign_id.clone(), c)))
            .collect::<Result<HashMap<_, _>>>()?;

        let users: HashMap<String, UserRef> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| {
                let u = model_to_user(m);
                (u.id.clone(), u)
            })
            .collect();

        let activity_counts = self.batch_count_activities(&ids).await?;
        let analytics_counts = self.batch_count_analytics(&ids).await?;

        let details = campaigns
            .into_iter()
            .map(|campaign| {
                let config = configs.remove(&campaign.id);
                let user = users.get(&campaign.created_by).cloned();
                let activity_count = activity_counts.get(&campaign.id).copied().unwrap_or(0);
                let analytics_count = analytics_counts.get(&campaign.id).copied().unwrap_or(0);
                CampaignDetails {
                    campaign,
                    config,
                    user,
                    activity_count,
                    analytics_count,
                }
            })
            .collect();

        Ok((details, total))
    }

    /// 活动审计日志分页，按时间倒序
    pub async fn list_activities(
        &self,
        campaign_id: &str,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<ActivityEntry>, u64)> {
        let total = campaign_activity::Entity::find()
            .filter(campaign_activity::Column::CampaignId.eq(campaign_id))
            .count(&self.db)
            .await?;

        let models = campaign_activity::Entity::find()
            .filter(campaign_activity::Column::CampaignId.eq(campaign_id))
            .order_by_desc(campaign_activity::Column::CreatedAt)
            .paginate(&self.db, limit)
            .fetch_page(page.saturating_sub(1))
            .await?;

        let entries = models
            .into_iter()
            .map(model_to_activity)
            .collect::<Result<Vec<_>>>()?;

        Ok((entries, total))
    }

    async fn batch_count_activities(&self, ids: &[String]) -> Result<HashMap<String, u64>> {
        let rows = campaign_activity::Entity::find()
            .select_only()
            .column(campaign_activity::Column::CampaignId)
            .column_as(campaign_activity::Column::Id.count(), "count")
            .filter(campaign_activity::Column::CampaignId.is_in(ids.iter().cloned()))
            .group_by(campaign_activity::Column::CampaignId)
            .into_model::<CountByCampaign>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.campaign_id, r.count.max(0) as u64))
            .collect())
    }

    async fn batch_count_analytics(&self, ids: &[String]) -> Result<HashMap<String, u64>> {
        let rows = analytics::Entity::find()
            .select_only()
            .column(analytics::Column::CampaignId)
            .column_as(analytics::Column::Id.count(), "count")
            .filter(analytics::Column::CampaignId.is_in(ids.iter().cloned()))
            .group_by(analytics::Column::CampaignId)
            .into_model::<CountByCampaign>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.campaign_id, r.count.max(0) as u64))
            .collect())
    }
}
