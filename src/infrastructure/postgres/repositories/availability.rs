use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::trainer_availability::{AvailabilityEntity, InsertAvailabilityEntity};
use crate::domain::repositories::availability::AvailabilityRepository;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, schema::trainer_availability,
};

pub struct AvailabilityPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AvailabilityPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AvailabilityRepository for AvailabilityPostgres {
    async fn upsert(&self, trainer_id: Uuid, slots: Value) -> Result<AvailabilityEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let insert_entity = InsertAvailabilityEntity {
            trainer_id,
            slots: slots.clone(),
        };

        let result = insert_into(trainer_availability::table)
            .values(&insert_entity)
            .on_conflict(trainer_availability::trainer_id)
            .do_update()
            .set((
                trainer_availability::slots.eq(slots),
                trainer_availability::updated_at.eq(Utc::now()),
            ))
            .returning(AvailabilityEntity::as_returning())
            .get_result::<AvailabilityEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_trainer(&self, trainer_id: Uuid) -> Result<Option<AvailabilityEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = trainer_availability::table
            .filter(trainer_availability::trainer_id.eq(trainer_id))
            .select(AvailabilityEntity::as_select())
            .first::<AvailabilityEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
