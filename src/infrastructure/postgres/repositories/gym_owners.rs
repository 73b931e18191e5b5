use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::domain::entities::gym_owners::{GymOwnerEntity, InsertGymOwnerEntity};
use crate::domain::repositories::gym_owners::GymOwnerRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::gym_owners};

pub struct GymOwnerPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl GymOwnerPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl GymOwnerRepository for GymOwnerPostgres {
    async fn insert(&self, insert_gym_owner_entity: InsertGymOwnerEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(gym_owners::table)
            .values(&insert_gym_owner_entity)
            .returning(gym_owners::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<GymOwnerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = gym_owners::table
            .filter(gym_owners::email.eq(email))
            .select(GymOwnerEntity::as_select())
            .first::<GymOwnerEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
