use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use crate::auth::AuthUser;
use crate::domain::repositories::trainers::TrainerRepository;
use crate::domain::value_objects::trainers::TrainerModel;
use crate::infrastructure::axum_http::error_responses::into_error_response;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, repositories::trainers::TrainerPostgres,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let trainer_repository = TrainerPostgres::new(Arc::clone(&db_pool));

    Router::new()
        .route("/", get(list_trainers))
        .with_state(Arc::new(trainer_repository))
}

/// Directory listing so clients can find someone to book.
pub async fn list_trainers<T>(
    State(trainer_repository): State<Arc<T>>,
    _auth: AuthUser,
) -> impl IntoResponse
where
    T: TrainerRepository + Send + Sync + 'static,
{
    match trainer_repository.list().await {
        Ok(trainers) => {
            let trainers: Vec<TrainerModel> =
                trainers.into_iter().map(TrainerModel::from).collect();
            (StatusCode::OK, Json(trainers)).into_response()
        }
        Err(err) => into_error_response(StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}
