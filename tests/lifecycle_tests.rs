//! Lifecycle manager integration tests against a real SQLite store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use campaignhub::errors::{CampaignHubError, Result};
use campaignhub::lifecycle::{
    CampaignLifecycle, CreateCampaignInput, Identity, PngDataUriEncoder, QrEncoder,
    TransitionPolicy,
};
use campaignhub::storage::{
    ActivityAction, CampaignPatch, CampaignStatus, CampaignStore, ConfigPatch, Platform, QrStatus,
};

const FRONTEND_BASE: &str = "http://localhost:3000";

/// 每次生成失败的编码器，用于验证二维码供给的可恢复性
struct FailingQrEncoder;

impl QrEncoder for FailingQrEncoder {
    fn encode(&self, _payload: &str) -> Result<String> {
        Err(CampaignHubError::qr_encoding("encoder unavailable"))
    }
}

async fn setup_store() -> (TempDir, Arc<CampaignStore>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    let store = CampaignStore::new(&url).await.expect("Failed to init store");
    (dir, Arc::new(store))
}

fn build_lifecycle(store: Arc<CampaignStore>) -> CampaignLifecycle {
    CampaignLifecycle::new(
        store,
        Arc::new(PngDataUriEncoder::default()),
        FRONTEND_BASE.to_string(),
        TransitionPolicy::default(),
    )
}

fn identity() -> Identity {
    Identity {
        user_id: "u-test".to_string(),
    }
}

fn spring_sale() -> CreateCampaignInput {
    let start = Utc::now();
    CreateCampaignInput {
        name: "Spring Sale".to_string(),
        brand_name: "Acme".to_string(),
        description: None,
        start_date: start,
        end_date: start + Duration::days(30),
        platforms: vec![Platform::Weibo],
    }
}

#[tokio::test]
async fn test_create_populates_qr_and_logs_activity() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store.clone());

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let campaign = &details.campaign;

    assert_eq!(campaign.status, CampaignStatus::Draft);
    assert_eq!(campaign.qr_status, QrStatus::Ready);
    let qr = campaign.qr_code_url.as_deref().expect("QR code missing");
    assert!(qr.starts_with("data:image/png;base64,"));
    assert_eq!(campaign.created_by, "u-test");
    assert_eq!(details.activity_count, 1);

    let (activities, total) = store.list_activities(&campaign.id, 1, 20).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(activities[0].action, ActivityAction::Created);
    assert_eq!(activities[0].details["createdBy"], "u-test");
    assert_eq!(activities[0].details["platforms"][0], "WEIBO");
}

#[tokio::test]
async fn test_create_rejects_inverted_dates() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store);

    let mut input = spring_sale();
    input.end_date = input.start_date - Duration::days(1);

    let err = lifecycle.create(&identity(), input).await.unwrap_err();
    assert!(matches!(err, CampaignHubError::Validation(_)));
}

#[tokio::test]
async fn test_create_rejects_empty_platforms() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store);

    let mut input = spring_sale();
    input.platforms.clear();

    let err = lifecycle.create(&identity(), input).await.unwrap_err();
    assert!(matches!(err, CampaignHubError::Validation(_)));
}

#[tokio::test]
async fn test_publish_draft_becomes_active_and_logs() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store.clone());

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();

    let published = lifecycle.publish(&identity(), &id).await.unwrap();
    assert_eq!(published.status, CampaignStatus::Active);
    assert!(published.qr_code_url.is_some());

    let (activities, total) = store.list_activities(&id, 1, 20).await.unwrap();
    assert_eq!(total, 2);
    // 最新的在前
    assert_eq!(activities[0].action, ActivityAction::Published);
    assert!(activities[0].details.get("publishedAt").is_some());
}

#[tokio::test]
async fn test_publish_when_active_is_conflict_and_state_unchanged() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store.clone());

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();

    lifecycle.publish(&identity(), &id).await.unwrap();
    let count_before = store.count_activities(&id).await.unwrap();

    let err = lifecycle.publish(&identity(), &id).await.unwrap_err();
    assert!(matches!(err, CampaignHubError::Conflict(_)));
    assert_eq!(err.message(), "Campaign is already active");

    // 状态不变，没有新增审计记录
    let campaign = store.get_campaign(&id).await.unwrap().unwrap();
    assert_eq!(campaign.status, CampaignStatus::Active);
    assert_eq!(store.count_activities(&id).await.unwrap(), count_before);
}

#[tokio::test]
async fn test_publish_provisions_missing_qr() {
    let (_dir, store) = setup_store().await;

    // 创建时编码器不可用，活动停留在 PENDING
    let broken = CampaignLifecycle::new(
        store.clone(),
        Arc::new(FailingQrEncoder),
        FRONTEND_BASE.to_string(),
        TransitionPolicy::default(),
    );
    let details = broken.create(&identity(), spring_sale()).await.unwrap();
    assert_eq!(details.campaign.qr_status, QrStatus::Pending);
    assert!(details.campaign.qr_code_url.is_none());

    // 发布时惰性补做供给
    let lifecycle = build_lifecycle(store.clone());
    let published = lifecycle
        .publish(&identity(), &details.campaign.id)
        .await
        .unwrap();
    assert_eq!(published.status, CampaignStatus::Active);
    assert_eq!(published.qr_status, QrStatus::Ready);
    assert!(
        published
            .qr_code_url
            .as_deref()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );
}

#[tokio::test]
async fn test_publish_aborts_when_qr_provisioning_fails() {
    let (_dir, store) = setup_store().await;

    let broken = CampaignLifecycle::new(
        store.clone(),
        Arc::new(FailingQrEncoder),
        FRONTEND_BASE.to_string(),
        TransitionPolicy::default(),
    );
    let details = broken.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();

    let err = broken.publish(&identity(), &id).await.unwrap_err();
    assert!(matches!(err, CampaignHubError::QrEncoding(_)));

    // 发布中止，状态保持 DRAFT，没有 PUBLISHED 审计
    let campaign = store.get_campaign(&id).await.unwrap().unwrap();
    assert_eq!(campaign.status, CampaignStatus::Draft);
    assert_eq!(store.count_activities(&id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_ensure_qr_recovers_pending_campaign() {
    let (_dir, store) = setup_store().await;

    let broken = CampaignLifecycle::new(
        store.clone(),
        Arc::new(FailingQrEncoder),
        FRONTEND_BASE.to_string(),
        TransitionPolicy::default(),
    );
    let details = broken.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();
    assert_eq!(details.campaign.qr_status, QrStatus::Pending);

    let lifecycle = build_lifecycle(store.clone());
    let recovered = lifecycle.ensure_qr(&id).await.unwrap();
    assert_eq!(recovered.qr_status, QrStatus::Ready);
    let first_qr = recovered.qr_code_url.clone().unwrap();

    // 再次调用是幂等的
    let again = lifecycle.ensure_qr(&id).await.unwrap();
    assert_eq!(again.qr_code_url.unwrap(), first_qr);
}

#[tokio::test]
async fn test_pause_active_campaign() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store.clone());

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();
    lifecycle.publish(&identity(), &id).await.unwrap();

    let paused = lifecycle.pause(&identity(), &id).await.unwrap();
    assert_eq!(paused.status, CampaignStatus::Paused);

    let (activities, _) = store.list_activities(&id, 1, 20).await.unwrap();
    assert_eq!(activities[0].action, ActivityAction::Paused);

    // 暂停后可以重新发布
    let republished = lifecycle.publish(&identity(), &id).await.unwrap();
    assert_eq!(republished.status, CampaignStatus::Active);
}

#[tokio::test]
async fn test_pause_from_draft_is_policy_gated() {
    let (_dir, store) = setup_store().await;

    // 默认策略允许暂停 DRAFT
    let lifecycle = build_lifecycle(store.clone());
    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let paused = lifecycle
        .pause(&identity(), &details.campaign.id)
        .await
        .unwrap();
    assert_eq!(paused.status, CampaignStatus::Paused);

    // 收紧策略后拒绝
    let strict = CampaignLifecycle::new(
        store.clone(),
        Arc::new(PngDataUriEncoder::default()),
        FRONTEND_BASE.to_string(),
        TransitionPolicy {
            allow_pause_from_draft: false,
        },
    );
    let details = strict.create(&identity(), spring_sale()).await.unwrap();
    let err = strict
        .pause(&identity(), &details.campaign.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CampaignHubError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_active_campaign_is_conflict_and_row_persists() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store.clone());

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();
    lifecycle.publish(&identity(), &id).await.unwrap();

    let err = lifecycle.delete(&identity(), &id).await.unwrap_err();
    assert!(matches!(err, CampaignHubError::Conflict(_)));
    assert_eq!(err.message(), "Cannot delete active campaign");

    // 行仍然存在
    assert!(store.get_campaign(&id).await.unwrap().is_some());

    // 暂停后可以删除
    lifecycle.pause(&identity(), &id).await.unwrap();
    lifecycle.delete(&identity(), &id).await.unwrap();
    assert!(store.get_campaign(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_campaign_is_not_found() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store);

    let err = lifecycle
        .delete(&identity(), "no-such-id")
        .await
        .unwrap_err();
    assert!(matches!(err, CampaignHubError::NotFound(_)));
}

#[tokio::test]
async fn test_update_logs_changed_field_names() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store.clone());

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();

    let patch = CampaignPatch {
        name: Some("Summer Sale".to_string()),
        end_date: Some(Utc::now() + Duration::days(60)),
        ..Default::default()
    };
    let updated = lifecycle.update(&identity(), &id, patch).await.unwrap();
    assert_eq!(updated.name, "Summer Sale");
    // 更新不改变状态
    assert_eq!(updated.status, CampaignStatus::Draft);

    let (activities, _) = store.list_activities(&id, 1, 20).await.unwrap();
    assert_eq!(activities[0].action, ActivityAction::Updated);
    let fields = activities[0].details["updatedFields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(fields, vec!["name", "endDate"]);
}

#[tokio::test]
async fn test_update_validates_merged_dates() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store);

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();

    // 新的 startDate 晚于已有 endDate
    let patch = CampaignPatch {
        start_date: Some(Utc::now() + Duration::days(90)),
        ..Default::default()
    };
    let err = lifecycle.update(&identity(), &id, patch).await.unwrap_err();
    assert!(matches!(err, CampaignHubError::Validation(_)));
}

#[tokio::test]
async fn test_config_partial_updates_retain_earlier_fields() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store.clone());

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();

    // 创建时配置已物化为默认值
    let config = store.get_config(&id).await.unwrap().unwrap();
    assert_eq!(config.max_images_per_post, 3);
    assert_eq!(config.max_posts_per_user, 1);

    // 两次互不相交的部分更新
    let first = ConfigPatch {
        reward_message: Some("晒单领券".to_string()),
        ..Default::default()
    };
    lifecycle.update_config(&identity(), &id, first).await.unwrap();

    let second = ConfigPatch {
        max_images_per_post: Some(5),
        ..Default::default()
    };
    let config = lifecycle
        .update_config(&identity(), &id, second)
        .await
        .unwrap();

    // 第一次更新的字段没有丢失
    assert_eq!(config.reward_message.as_deref(), Some("晒单领券"));
    assert_eq!(config.max_images_per_post, 5);
    assert_eq!(config.max_posts_per_user, 1);

    let (activities, total) = store.list_activities(&id, 1, 20).await.unwrap();
    assert_eq!(total, 3); // CREATED + 2x CONFIG_UPDATED
    assert_eq!(activities[0].action, ActivityAction::ConfigUpdated);
    assert_eq!(activities[0].details["updatedConfig"][0], "maxImagesPerPost");
}

#[tokio::test]
async fn test_activity_count_is_monotonic_across_operations() {
    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store.clone());

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = details.campaign.id.clone();

    let mut last = store.count_activities(&id).await.unwrap();
    assert_eq!(last, 1);

    lifecycle.publish(&identity(), &id).await.unwrap();
    let count = store.count_activities(&id).await.unwrap();
    assert_eq!(count, last + 1);
    last = count;

    lifecycle.pause(&identity(), &id).await.unwrap();
    let count = store.count_activities(&id).await.unwrap();
    assert_eq!(count, last + 1);
    last = count;

    let patch = CampaignPatch {
        description: Some("updated".to_string()),
        ..Default::default()
    };
    lifecycle.update(&identity(), &id, patch).await.unwrap();
    assert_eq!(store.count_activities(&id).await.unwrap(), last + 1);
}

#[tokio::test]
async fn test_qr_payload_encodes_campaign_deep_link() {
    use campaignhub::lifecycle::campaign_payload_url;

    let (_dir, store) = setup_store().await;
    let lifecycle = build_lifecycle(store);

    let details = lifecycle.create(&identity(), spring_sale()).await.unwrap();
    let id = &details.campaign.id;

    // 编码是纯函数：对同一 payload 重新编码得到相同的 data URI
    let encoder = PngDataUriEncoder::default();
    let expected = encoder.encode(&campaign_payload_url(FRONTEND_BASE, id)).unwrap();
    assert_eq!(details.campaign.qr_code_url.as_deref(), Some(expected.as_str()));
}
