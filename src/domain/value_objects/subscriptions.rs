use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;
use crate::domain::entities::subscriptions::SubscriptionEntity;
use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
use crate::domain::value_objects::plans::PlanFeatures;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertSubscriptionModel {
    pub plan_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionModel {
    pub id: Uuid,
    pub client_id: Uuid,
    pub plan_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub renews_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub amount_paid_minor: i64,
    pub status: SubscriptionStatus,
    pub canceled_at: Option<DateTime<Utc>>,
}

impl From<SubscriptionEntity> for SubscriptionModel {
    fn from(entity: SubscriptionEntity) -> Self {
        let status = SubscriptionStatus::try_from(entity.status.as_str()).unwrap_or_default();
        Self {
            id: entity.id,
            client_id: entity.client_id,
            plan_id: entity.plan_id,
            starts_at: entity.starts_at,
            renews_at: entity.renews_at,
            ends_at: entity.ends_at,
            amount_paid_minor: entity.amount_paid_minor,
            status,
            canceled_at: entity.canceled_at,
        }
    }
}

/// A client's active subscription joined with the plan terms the booking
/// engine needs (discount, monthly cap).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub subscription: SubscriptionModel,
    pub plan_name: String,
    pub features: PlanFeatures,
}

impl From<(SubscriptionEntity, PlanEntity)> for SubscriptionView {
    fn from((subscription, plan): (SubscriptionEntity, PlanEntity)) -> Self {
        let features = PlanFeatures::from_value(&plan.features);
        Self {
            subscription: SubscriptionModel::from(subscription),
            plan_name: plan.name,
            features,
        }
    }
}

/// Roster row for the gym-owner view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSubscriptionView {
    #[serde(flatten)]
    pub subscription: SubscriptionModel,
    pub client_username: String,
    pub client_email: String,
}

impl From<(SubscriptionEntity, String, String)> for OwnerSubscriptionView {
    fn from((entity, client_username, client_email): (SubscriptionEntity, String, String)) -> Self {
        Self {
            subscription: SubscriptionModel::from(entity),
            client_username,
            client_email,
        }
    }
}
