use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::domain::entities::plans::PlanEntity;
use crate::domain::entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity};
use crate::domain::repositories::subscriptions::SubscriptionRepository;
use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    schema::{plans, subscriptions, users},
};

pub struct SubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionPostgres {
    async fn list_plans(&self) -> Result<Vec<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = plans::table
            .filter(plans::is_active.eq(true))
            .order(plans::price_minor.asc())
            .select(PlanEntity::as_select())
            .load::<PlanEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_plan(&self, plan_id: Uuid) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = plans::table
            .find(plan_id)
            .select(PlanEntity::as_select())
            .first::<PlanEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn subscribe(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(subscriptions::table)
            .values(&insert_subscription_entity)
            .returning(SubscriptionEntity::as_returning())
            .get_result::<SubscriptionEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_active_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Option<(SubscriptionEntity, PlanEntity)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscriptions::table
            .inner_join(plans::table)
            .filter(subscriptions::client_id.eq(client_id))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.to_string()))
            .filter(subscriptions::ends_at.gt(Utc::now()))
            .select((SubscriptionEntity::as_select(), PlanEntity::as_select()))
            .first::<(SubscriptionEntity, PlanEntity)>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn cancel(&self, subscription_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(subscriptions::table.find(subscription_id))
            .set((
                subscriptions::status.eq(SubscriptionStatus::Canceled.to_string()),
                subscriptions::canceled_at.eq(Some(Utc::now())),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_with_clients(&self) -> Result<Vec<(SubscriptionEntity, String, String)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscriptions::table
            .inner_join(users::table)
            .order(subscriptions::created_at.desc())
            .select((
                SubscriptionEntity::as_select(),
                users::username,
                users::email,
            ))
            .load::<(SubscriptionEntity, String, String)>(&mut conn)?;

        Ok(results)
    }
}
