use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use uuid::Uuid;

use crate::domain::entities::trainers::{InsertTrainerEntity, TrainerEntity};
use crate::domain::repositories::trainers::TrainerRepository;
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::trainers};

pub struct TrainerPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl TrainerPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl TrainerRepository for TrainerPostgres {
    async fn insert(&self, insert_trainer_entity: InsertTrainerEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(trainers::table)
            .values(&insert_trainer_entity)
            .returning(trainers::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, trainer_id: Uuid) -> Result<Option<TrainerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = trainers::table
            .find(trainer_id)
            .select(TrainerEntity::as_select())
            .first::<TrainerEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<TrainerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = trainers::table
            .filter(trainers::email.eq(email))
            .select(TrainerEntity::as_select())
            .first::<TrainerEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list(&self) -> Result<Vec<TrainerEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = trainers::table
            .order(trainers::username.asc())
            .select(TrainerEntity::as_select())
            .load::<TrainerEntity>(&mut conn)?;

        Ok(results)
    }
}
