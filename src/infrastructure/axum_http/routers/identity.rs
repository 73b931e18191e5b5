use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};

use crate::application::usecases::identity::IdentityUseCase;
use crate::config::config_model::AuthSecret;
use crate::domain::repositories::{
    gym_owners::GymOwnerRepository, trainers::TrainerRepository, users::UserRepository,
};
use crate::domain::value_objects::identity::{LoginModel, SignupModel};
use crate::infrastructure::axum_http::error_responses::into_error_response;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        gym_owners::GymOwnerPostgres, trainers::TrainerPostgres, users::UserPostgres,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, auth_secret: AuthSecret) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let trainer_repository = TrainerPostgres::new(Arc::clone(&db_pool));
    let gym_owner_repository = GymOwnerPostgres::new(Arc::clone(&db_pool));

    let usecase = IdentityUseCase::new(
        Arc::new(user_repository),
        Arc::new(trainer_repository),
        Arc::new(gym_owner_repository),
        auth_secret,
    );

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .with_state(Arc::new(usecase))
}

pub async fn signup<U, T, G>(
    State(usecase): State<Arc<IdentityUseCase<U, T, G>>>,
    Json(model): Json<SignupModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    G: GymOwnerRepository + Send + Sync + 'static,
{
    match usecase.signup(model).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn login<U, T, G>(
    State(usecase): State<Arc<IdentityUseCase<U, T, G>>>,
    Json(model): Json<LoginModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    G: GymOwnerRepository + Send + Sync + 'static,
{
    match usecase.login(model).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}
