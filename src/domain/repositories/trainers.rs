use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::trainers::{InsertTrainerEntity, TrainerEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainerRepository {
    async fn insert(&self, insert_trainer_entity: InsertTrainerEntity) -> Result<Uuid>;
    async fn find_by_id(&self, trainer_id: Uuid) -> Result<Option<TrainerEntity>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<TrainerEntity>>;
    async fn list(&self) -> Result<Vec<TrainerEntity>>;
}
