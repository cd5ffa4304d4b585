pub mod backend;
pub mod models;

pub use backend::{AnalyticsFilter, CampaignFilter, CampaignStore};
pub use models::{
    ActivityAction, ActivityEntry, AnalyticsEvent, Campaign, CampaignConfig, CampaignDetails,
    CampaignPatch, CampaignStatus, ConfigPatch, Platform, QrStatus, TemplateType, UserRef,
};
