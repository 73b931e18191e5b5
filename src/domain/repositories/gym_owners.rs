use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::gym_owners::{GymOwnerEntity, InsertGymOwnerEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GymOwnerRepository {
    async fn insert(&self, insert_gym_owner_entity: InsertGymOwnerEntity) -> Result<Uuid>;
    async fn find_by_email(&self, email: &str) -> Result<Option<GymOwnerEntity>>;
}
