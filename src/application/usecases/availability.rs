use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::repositories::availability::AvailabilityRepository;
use crate::domain::repositories::trainers::TrainerRepository;
use crate::domain::value_objects::availability::{
    AvailabilityModel, AvailabilitySlot, SlotInput, parse_slots,
};

#[derive(Debug, Error)]
pub enum AvailabilityError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("trainer not found")]
    TrainerNotFound,
    #[error("no availability found for this trainer")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AvailabilityError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AvailabilityError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AvailabilityError::TrainerNotFound | AvailabilityError::NotFound => {
                StatusCode::NOT_FOUND
            }
            AvailabilityError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AvailabilityResult<T> = std::result::Result<T, AvailabilityError>;

pub struct AvailabilityUseCase<A, T>
where
    A: AvailabilityRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    availability_repository: Arc<A>,
    trainer_repository: Arc<T>,
}

impl<A, T> AvailabilityUseCase<A, T>
where
    A: AvailabilityRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    pub fn new(availability_repository: Arc<A>, trainer_repository: Arc<T>) -> Self {
        Self {
            availability_repository,
            trainer_repository,
        }
    }

    /// Full overwrite of the trainer's slot set; nothing is persisted when
    /// any entry fails validation.
    pub async fn set_availability(
        &self,
        trainer_id: Uuid,
        inputs: Vec<SlotInput>,
    ) -> AvailabilityResult<AvailabilityModel> {
        let slots = parse_slots(&inputs).map_err(|reason| {
            warn!(%trainer_id, reason, "availability: rejected slot set");
            AvailabilityError::InvalidInput(reason)
        })?;

        self.trainer_repository
            .find_by_id(trainer_id)
            .await
            .map_err(AvailabilityError::Internal)?
            .ok_or(AvailabilityError::TrainerNotFound)?;

        let entity = self
            .availability_repository
            .upsert(trainer_id, serde_json::to_value(&slots).map_err(anyhow::Error::from)?)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "availability: upsert failed");
                AvailabilityError::Internal(err)
            })?;

        info!(%trainer_id, slot_days = slots.len(), "availability: slot set replaced");
        Ok(AvailabilityModel {
            trainer_id,
            slots,
            updated_at: entity.updated_at,
        })
    }

    pub async fn get_availability(&self, trainer_id: Uuid) -> AvailabilityResult<AvailabilityModel> {
        let entity = self
            .availability_repository
            .find_by_trainer(trainer_id)
            .await
            .map_err(AvailabilityError::Internal)?
            .ok_or(AvailabilityError::NotFound)?;

        let slots: Vec<AvailabilitySlot> =
            serde_json::from_value(entity.slots).map_err(anyhow::Error::from)?;

        Ok(AvailabilityModel {
            trainer_id,
            slots,
            updated_at: entity.updated_at,
        })
    }

    /// Rewrites the document without the named day. Removing an absent day
    /// is a no-op that returns the unchanged document.
    pub async fn remove_day(
        &self,
        trainer_id: Uuid,
        day: &str,
    ) -> AvailabilityResult<AvailabilityModel> {
        let entity = self
            .availability_repository
            .find_by_trainer(trainer_id)
            .await
            .map_err(AvailabilityError::Internal)?
            .ok_or(AvailabilityError::NotFound)?;

        let mut slots: Vec<AvailabilitySlot> =
            serde_json::from_value(entity.slots).map_err(anyhow::Error::from)?;
        slots.retain(|slot| slot.day != day);

        let updated = self
            .availability_repository
            .upsert(trainer_id, serde_json::to_value(&slots).map_err(anyhow::Error::from)?)
            .await
            .map_err(|err| {
                error!(%trainer_id, day, db_error = ?err, "availability: day removal failed");
                AvailabilityError::Internal(err)
            })?;

        info!(%trainer_id, day, "availability: day removed");
        Ok(AvailabilityModel {
            trainer_id,
            slots,
            updated_at: updated.updated_at,
        })
    }
}
