use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};
use tracing::info;
use uuid::Uuid;

use crate::application::usecases::bookings::BookingUseCase;
use crate::auth::AuthUser;
use crate::domain::repositories::{
    availability::AvailabilityRepository, bookings::BookingRepository,
    subscriptions::SubscriptionRepository, trainers::TrainerRepository, users::UserRepository,
};
use crate::domain::value_objects::bookings::BookSessionModel;
use crate::domain::value_objects::enums::roles::Role;
use crate::infrastructure::axum_http::error_responses::into_error_response;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        availability::AvailabilityPostgres, bookings::BookingPostgres,
        subscriptions::SubscriptionPostgres, trainers::TrainerPostgres, users::UserPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let booking_repository = BookingPostgres::new(Arc::clone(&db_pool));
    let availability_repository = AvailabilityPostgres::new(Arc::clone(&db_pool));
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let trainer_repository = TrainerPostgres::new(Arc::clone(&db_pool));

    let usecase = BookingUseCase::new(
        Arc::new(booking_repository),
        Arc::new(availability_repository),
        Arc::new(subscription_repository),
        Arc::new(user_repository),
        Arc::new(trainer_repository),
    );

    Router::new()
        .route("/", post(book_session).get(list_bookings))
        .route("/:booking_id", delete(cancel_booking))
        .with_state(Arc::new(usecase))
}

pub async fn book_session<B, A, S, U, T>(
    State(usecase): State<Arc<BookingUseCase<B, A, S, U, T>>>,
    auth: AuthUser,
    Json(model): Json<BookSessionModel>,
) -> impl IntoResponse
where
    B: BookingRepository + Send + Sync + 'static,
    A: AvailabilityRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require(Role::Client) {
        return err.into_response();
    }

    match usecase.book_session(auth.user_id, model).await {
        Ok(booking) => (StatusCode::CREATED, Json(booking)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn list_bookings<B, A, S, U, T>(
    State(usecase): State<Arc<BookingUseCase<B, A, S, U, T>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    B: BookingRepository + Send + Sync + 'static,
    A: AvailabilityRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require(Role::Client) {
        return err.into_response();
    }

    info!(user_id = %auth.user_id, "bookings: list request received");
    match usecase.list_bookings(auth.user_id).await {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn cancel_booking<B, A, S, U, T>(
    State(usecase): State<Arc<BookingUseCase<B, A, S, U, T>>>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> impl IntoResponse
where
    B: BookingRepository + Send + Sync + 'static,
    A: AvailabilityRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    match usecase.cancel_booking(booking_id, auth.user_id).await {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}
