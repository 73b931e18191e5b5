use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::trainer_availability::AvailabilityEntity;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityRepository {
    /// Insert-or-replace on the trainer's unique availability row.
    async fn upsert(&self, trainer_id: Uuid, slots: Value) -> Result<AvailabilityEntity>;
    async fn find_by_trainer(&self, trainer_id: Uuid) -> Result<Option<AvailabilityEntity>>;
}
