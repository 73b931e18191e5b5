use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::trainers::TrainerEntity;

/// Public trainer directory row; credentials never leave the entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainerModel {
    pub id: Uuid,
    pub username: String,
    pub specialties: Vec<String>,
    pub experience_years: Option<i32>,
}

impl From<TrainerEntity> for TrainerModel {
    fn from(entity: TrainerEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            specialties: entity.specialties,
            experience_years: entity.experience_years,
        }
    }
}
