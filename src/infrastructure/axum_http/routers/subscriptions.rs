use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::usecases::subscriptions::SubscriptionUseCase;
use crate::auth::AuthUser;
use crate::domain::repositories::subscriptions::SubscriptionRepository;
use crate::domain::value_objects::enums::roles::Role;
use crate::domain::value_objects::subscriptions::InsertSubscriptionModel;
use crate::infrastructure::axum_http::error_responses::into_error_response;
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, repositories::subscriptions::SubscriptionPostgres,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let usecase = SubscriptionUseCase::new(Arc::new(subscription_repository));

    Router::new()
        .route("/", post(subscribe).get(list_subscriptions))
        .route("/plans", get(list_plans))
        .route("/current", get(current_subscription))
        .route("/cancel", post(cancel_subscription))
        .with_state(Arc::new(usecase))
}

pub async fn list_plans<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    match usecase.list_plans().await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn subscribe<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    auth: AuthUser,
    Json(model): Json<InsertSubscriptionModel>,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require(Role::Client) {
        return err.into_response();
    }

    match usecase.subscribe(auth.user_id, model).await {
        Ok(subscription) => (StatusCode::CREATED, Json(subscription)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn current_subscription<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require(Role::Client) {
        return err.into_response();
    }

    match usecase.current(auth.user_id).await {
        Ok(subscription) => (StatusCode::OK, Json(subscription)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

pub async fn cancel_subscription<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require(Role::Client) {
        return err.into_response();
    }

    match usecase.cancel(auth.user_id).await {
        Ok(subscription) => (StatusCode::OK, Json(subscription)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}

/// Gym-owner roster over every client subscription.
pub async fn list_subscriptions<S>(
    State(usecase): State<Arc<SubscriptionUseCase<S>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
{
    if let Err(err) = auth.require(Role::GymOwner) {
        return err.into_response();
    }

    match usecase.list_all().await {
        Ok(subscriptions) => (StatusCode::OK, Json(subscriptions)).into_response(),
        Err(err) => into_error_response(err.status_code(), err),
    }
}
