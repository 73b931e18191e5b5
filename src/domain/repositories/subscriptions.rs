use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;
use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository {
    async fn list_plans(&self) -> Result<Vec<PlanEntity>>;
    async fn find_plan(&self, plan_id: Uuid) -> Result<Option<PlanEntity>>;
    async fn subscribe(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;
    /// The client's current active, unexpired subscription joined with its plan.
    async fn find_active_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Option<(SubscriptionEntity, PlanEntity)>>;
    async fn cancel(&self, subscription_id: Uuid) -> Result<()>;
    /// Every subscription with the owning client's username and email.
    async fn list_with_clients(&self) -> Result<Vec<(SubscriptionEntity, String, String)>>;
}
