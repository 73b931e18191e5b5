use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::subscriptions::InsertSubscriptionEntity;
use crate::domain::repositories::subscriptions::SubscriptionRepository;
use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
use crate::domain::value_objects::plans::{PlanFeatures, PlanModel};
use crate::domain::value_objects::subscriptions::{
    InsertSubscriptionModel, OwnerSubscriptionView, SubscriptionModel, SubscriptionView,
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("client already has an active subscription")]
    AlreadySubscribed,
    #[error("no active subscription")]
    SubscriptionNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound | SubscriptionError::SubscriptionNotFound => {
                StatusCode::NOT_FOUND
            }
            SubscriptionError::AlreadySubscribed => StatusCode::BAD_REQUEST,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type SubscriptionResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscription_repository: Arc<S>,
}

impl<S> SubscriptionUseCase<S>
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repository: Arc<S>) -> Self {
        Self {
            subscription_repository,
        }
    }

    pub async fn list_plans(&self) -> SubscriptionResult<Vec<PlanModel>> {
        let plans = self
            .subscription_repository
            .list_plans()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscriptions: failed to list plans");
                SubscriptionError::Internal(err)
            })?;

        Ok(plans
            .into_iter()
            .map(|plan| PlanModel {
                id: plan.id,
                name: plan.name,
                price_minor: plan.price_minor,
                duration_days: plan.duration_days,
                features: PlanFeatures::from_value(&plan.features),
                is_active: plan.is_active,
            })
            .collect())
    }

    pub async fn subscribe(
        &self,
        client_id: Uuid,
        model: InsertSubscriptionModel,
    ) -> SubscriptionResult<SubscriptionModel> {
        let plan = self
            .subscription_repository
            .find_plan(model.plan_id)
            .await
            .map_err(SubscriptionError::Internal)?
            .filter(|plan| plan.is_active)
            .ok_or(SubscriptionError::PlanNotFound)?;

        if self
            .subscription_repository
            .find_active_for_client(client_id)
            .await
            .map_err(SubscriptionError::Internal)?
            .is_some()
        {
            warn!(%client_id, "subscriptions: client already subscribed");
            return Err(SubscriptionError::AlreadySubscribed);
        }

        let now = Utc::now();
        let ends_at = now + Duration::days(plan.duration_days as i64);
        let subscription = self
            .subscription_repository
            .subscribe(InsertSubscriptionEntity {
                client_id,
                plan_id: plan.id,
                starts_at: now,
                renews_at: ends_at,
                ends_at,
                amount_paid_minor: plan.price_minor as i64,
                status: SubscriptionStatus::Active.to_string(),
            })
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "subscriptions: subscribe failed");
                SubscriptionError::Internal(err)
            })?;

        info!(
            %client_id,
            subscription_id = %subscription.id,
            plan = plan.name,
            "subscriptions: client subscribed"
        );
        Ok(SubscriptionModel::from(subscription))
    }

    pub async fn current(&self, client_id: Uuid) -> SubscriptionResult<Option<SubscriptionView>> {
        let current = self
            .subscription_repository
            .find_active_for_client(client_id)
            .await
            .map_err(SubscriptionError::Internal)?;

        Ok(current.map(SubscriptionView::from))
    }

    pub async fn cancel(&self, client_id: Uuid) -> SubscriptionResult<SubscriptionModel> {
        let (subscription, _) = self
            .subscription_repository
            .find_active_for_client(client_id)
            .await
            .map_err(SubscriptionError::Internal)?
            .ok_or(SubscriptionError::SubscriptionNotFound)?;

        self.subscription_repository
            .cancel(subscription.id)
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "subscriptions: cancel failed");
                SubscriptionError::Internal(err)
            })?;

        info!(%client_id, subscription_id = %subscription.id, "subscriptions: cancelled");

        let mut model = SubscriptionModel::from(subscription);
        model.status = SubscriptionStatus::Canceled;
        Ok(model)
    }

    pub async fn list_all(&self) -> SubscriptionResult<Vec<OwnerSubscriptionView>> {
        let rows = self
            .subscription_repository
            .list_with_clients()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscriptions: roster load failed");
                SubscriptionError::Internal(err)
            })?;

        Ok(rows.into_iter().map(OwnerSubscriptionView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::domain::entities::plans::PlanEntity;
    use crate::domain::entities::subscriptions::SubscriptionEntity;
    use crate::domain::repositories::subscriptions::MockSubscriptionRepository;

    fn sample_plan(id: Uuid, is_active: bool) -> PlanEntity {
        PlanEntity {
            id,
            name: "premium".to_string(),
            price_minor: 4900,
            duration_days: 30,
            features: json!({ "session_discount_percent": 10, "max_bookings_per_month": 20 }),
            is_active,
        }
    }

    fn stored(entity: InsertSubscriptionEntity) -> SubscriptionEntity {
        SubscriptionEntity {
            id: Uuid::new_v4(),
            client_id: entity.client_id,
            plan_id: entity.plan_id,
            starts_at: entity.starts_at,
            renews_at: entity.renews_at,
            ends_at: entity.ends_at,
            amount_paid_minor: entity.amount_paid_minor,
            status: entity.status,
            canceled_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn subscribing_to_unknown_plan_is_not_found() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_find_plan().returning(|_| Ok(None));

        let usecase = SubscriptionUseCase::new(Arc::new(repo));
        let result = usecase
            .subscribe(
                Uuid::new_v4(),
                InsertSubscriptionModel {
                    plan_id: Uuid::new_v4(),
                },
            )
            .await;

        assert!(matches!(result, Err(SubscriptionError::PlanNotFound)));
    }

    #[tokio::test]
    async fn inactive_plan_is_treated_as_missing() {
        let plan_id = Uuid::new_v4();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_find_plan()
            .returning(move |id| Ok(Some(sample_plan(id, false))));

        let usecase = SubscriptionUseCase::new(Arc::new(repo));
        let result = usecase
            .subscribe(Uuid::new_v4(), InsertSubscriptionModel { plan_id })
            .await;

        assert!(matches!(result, Err(SubscriptionError::PlanNotFound)));
    }

    #[tokio::test]
    async fn second_active_subscription_is_rejected() {
        let plan_id = Uuid::new_v4();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_find_plan()
            .returning(move |id| Ok(Some(sample_plan(id, true))));
        repo.expect_find_active_for_client().returning(move |client_id| {
            let entity = stored(InsertSubscriptionEntity {
                client_id,
                plan_id,
                starts_at: Utc::now(),
                renews_at: Utc::now(),
                ends_at: Utc::now() + Duration::days(30),
                amount_paid_minor: 4900,
                status: SubscriptionStatus::Active.to_string(),
            });
            Ok(Some((entity, sample_plan(plan_id, true))))
        });

        let usecase = SubscriptionUseCase::new(Arc::new(repo));
        let result = usecase
            .subscribe(Uuid::new_v4(), InsertSubscriptionModel { plan_id })
            .await;

        assert!(matches!(result, Err(SubscriptionError::AlreadySubscribed)));
    }

    #[tokio::test]
    async fn subscription_spans_the_plan_duration() {
        let plan_id = Uuid::new_v4();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_find_plan()
            .returning(move |id| Ok(Some(sample_plan(id, true))));
        repo.expect_find_active_for_client().returning(|_| Ok(None));
        repo.expect_subscribe()
            .withf(|entity| {
                entity.status == "active"
                    && entity.amount_paid_minor == 4900
                    && (entity.ends_at - entity.starts_at) == Duration::days(30)
            })
            .returning(|entity| Ok(stored(entity)));

        let usecase = SubscriptionUseCase::new(Arc::new(repo));
        let subscription = usecase
            .subscribe(Uuid::new_v4(), InsertSubscriptionModel { plan_id })
            .await
            .unwrap();

        assert_eq!(subscription.status, SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn cancel_without_active_subscription_is_not_found() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_find_active_for_client().returning(|_| Ok(None));

        let usecase = SubscriptionUseCase::new(Arc::new(repo));
        let result = usecase.cancel(Uuid::new_v4()).await;

        assert!(matches!(result, Err(SubscriptionError::SubscriptionNotFound)));
    }
}
