use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::users::{InsertUserEntity, UserEntity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository {
    async fn insert(&self, insert_user_entity: InsertUserEntity) -> Result<Uuid>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
}
