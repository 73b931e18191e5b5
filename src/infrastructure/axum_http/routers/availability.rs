use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::application::usecases::availability::AvailabilityUseCase;
use crate::auth::AuthUser;
use crate::domain::repositories::{
    availability::AvailabilityRepository, trainers::TrainerRepository,
};
use crate::domain::value_objects::availability::SetAvailabilityModel;
use crate::domain::value_objects::enums::roles::Role;
use crate::infrastructure::axum_http::error_responses::into_error_response;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{availability::AvailabilityPostgres, trainers::TrainerPostgres},
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let availability_repository = AvailabilityPostgres::new(Arc::clone(&db_pool));
    let trainer_repository = TrainerPostgres::new(Arc::clone(&db_pool));
    let usecase = AvailabilityUseCase::new(
        Arc::new(availability_repository),
        Arc::new(trainer_repository),
    );

    Router::new()
        .route("/", post(set_availability))
        .route("/:trainer_id", get(get_availability))
        .route("/days/:day", delete(remove_day))
        .with_state(Arc::new(usecase))
}

/// The trainer id always comes from the token, never the request body.
pub async fn set_availability<A, T>(
    State(usecase): State<Arc<AvailabilityUseCase<A, T>>>,
    auth: AuthUser,
    Json(model): Json<SetAvailabilityModel>,
) -> impl IntoResponse
where
    A: AvailabilityRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require(Role::Trainer) {
        return err.into_response();
    }

    match usecase
        .set_availability(auth.user_id, model.available_slots)
        .await
    {
        Ok(availability) => (StatusCode::CREATED, Json(availability)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn get_availability<A, T>(
    State(usecase): State<Arc<AvailabilityUseCase<A, T>>>,
    Path(trainer_id): Path<Uuid>,
) -> impl IntoResponse
where
    A: AvailabilityRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    match usecase.get_availability(trainer_id).await {
        Ok(availability) => (StatusCode::OK, Json(availability)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn remove_day<A, T>(
    State(usecase): State<Arc<AvailabilityUseCase<A, T>>>,
    auth: AuthUser,
    Path(day): Path<String>,
) -> impl IntoResponse
where
    A: AvailabilityRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require(Role::Trainer) {
        return err.into_response();
    }

    match usecase.remove_day(auth.user_id, &day).await {
        Ok(availability) => (StatusCode::OK, Json(availability)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}
