use std::sync::Arc;

use chrono::{DateTime, Datelike, Months, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::bookings::InsertBookingEntity;
use crate::domain::repositories::{
    availability::AvailabilityRepository,
    bookings::{BookingRepository, CreateBookingError},
    subscriptions::SubscriptionRepository,
    trainers::TrainerRepository,
    users::UserRepository,
};
use crate::domain::value_objects::availability::{AvailabilitySlot, contains_instant};
use crate::domain::value_objects::bookings::{BookSessionModel, BookingModel, ClientBookingView};
use crate::domain::value_objects::enums::booking_statuses::BookingStatus;
use crate::domain::value_objects::plans::PlanFeatures;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("client not found")]
    ClientNotFound,
    #[error("trainer not found")]
    TrainerNotFound,
    #[error("trainer has not set availability")]
    AvailabilityNotSet,
    #[error("trainer is not available at the requested time")]
    SlotUnavailable,
    #[error("an active subscription is required to book a session")]
    SubscriptionRequired,
    #[error("monthly booking limit reached for the current plan")]
    MonthlyLimitReached,
    #[error("insufficient balance, outstanding fees must be paid first")]
    BalanceExceeded,
    #[error("this session is already booked")]
    DuplicateBooking,
    #[error("booking not found")]
    NotFound,
    #[error("not a participant in this booking")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BookingError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            BookingError::InvalidInput(_)
            | BookingError::AvailabilityNotSet
            | BookingError::SlotUnavailable
            | BookingError::SubscriptionRequired
            | BookingError::MonthlyLimitReached
            | BookingError::BalanceExceeded
            | BookingError::DuplicateBooking => StatusCode::BAD_REQUEST,
            BookingError::ClientNotFound | BookingError::TrainerNotFound | BookingError::NotFound => {
                StatusCode::NOT_FOUND
            }
            BookingError::Forbidden => StatusCode::FORBIDDEN,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type BookingResult<T> = std::result::Result<T, BookingError>;

pub struct BookingUseCase<B, A, S, U, T>
where
    B: BookingRepository + Send + Sync + 'static,
    A: AvailabilityRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    booking_repository: Arc<B>,
    availability_repository: Arc<A>,
    subscription_repository: Arc<S>,
    user_repository: Arc<U>,
    trainer_repository: Arc<T>,
}

impl<B, A, S, U, T> BookingUseCase<B, A, S, U, T>
where
    B: BookingRepository + Send + Sync + 'static,
    A: AvailabilityRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
{
    pub fn new(
        booking_repository: Arc<B>,
        availability_repository: Arc<A>,
        subscription_repository: Arc<S>,
        user_repository: Arc<U>,
        trainer_repository: Arc<T>,
    ) -> Self {
        Self {
            booking_repository,
            availability_repository,
            subscription_repository,
            user_repository,
            trainer_repository,
        }
    }

    pub async fn book_session(
        &self,
        client_id: Uuid,
        model: BookSessionModel,
    ) -> BookingResult<BookingModel> {
        let trainer_id = Uuid::parse_str(&model.trainer_id)
            .map_err(|_| BookingError::InvalidInput("Invalid trainer ID format".to_string()))?;
        let session_time = DateTime::parse_from_rfc3339(&model.session_time)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| BookingError::InvalidInput("Invalid session time format".to_string()))?;

        if model.session_cost_minor.is_some_and(|cost| cost < 0) {
            return Err(BookingError::InvalidInput(
                "Session cost must not be negative".to_string(),
            ));
        }

        info!(
            %client_id,
            %trainer_id,
            %session_time,
            "bookings: session requested"
        );

        let client = self
            .user_repository
            .find_by_id(client_id)
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "bookings: failed to load client");
                BookingError::Internal(err)
            })?
            .ok_or(BookingError::ClientNotFound)?;

        self.trainer_repository
            .find_by_id(trainer_id)
            .await
            .map_err(|err| {
                error!(%trainer_id, db_error = ?err, "bookings: failed to load trainer");
                BookingError::Internal(err)
            })?
            .ok_or(BookingError::TrainerNotFound)?;

        let availability = self
            .availability_repository
            .find_by_trainer(trainer_id)
            .await
            .map_err(BookingError::Internal)?
            .ok_or_else(|| {
                warn!(%trainer_id, "bookings: trainer has no availability document");
                BookingError::AvailabilityNotSet
            })?;

        let slots: Vec<AvailabilitySlot> =
            serde_json::from_value(availability.slots).map_err(|err| {
                error!(%trainer_id, parse_error = ?err, "bookings: stored slots are malformed");
                BookingError::Internal(err.into())
            })?;

        if !contains_instant(&slots, session_time) {
            warn!(%trainer_id, %session_time, "bookings: requested instant not in slot set");
            return Err(BookingError::SlotUnavailable);
        }

        let (_, plan) = self
            .subscription_repository
            .find_active_for_client(client_id)
            .await
            .map_err(BookingError::Internal)?
            .ok_or_else(|| {
                warn!(%client_id, "bookings: no active subscription");
                BookingError::SubscriptionRequired
            })?;
        let features = PlanFeatures::from_value(&plan.features);

        let (month_start, month_end) = month_window(session_time)
            .ok_or_else(|| anyhow::anyhow!("Could not derive month window for {session_time}"))?;
        let booked_this_month = self
            .booking_repository
            .count_active_for_client_between(client_id, month_start, month_end)
            .await
            .map_err(BookingError::Internal)?;

        if booked_this_month >= features.max_bookings_per_month_or_default() {
            warn!(
                %client_id,
                booked_this_month,
                "bookings: monthly limit reached"
            );
            return Err(BookingError::MonthlyLimitReached);
        }

        let charge_minor = model
            .session_cost_minor
            .map(|cost| discounted_cost(cost, features.session_discount_or_default()));

        if let Some(charge) = charge_minor {
            if client.balance_due_minor + charge > client.balance_limit_minor {
                warn!(
                    %client_id,
                    charge,
                    balance_due = client.balance_due_minor,
                    balance_limit = client.balance_limit_minor,
                    "bookings: charge would exceed balance limit"
                );
                return Err(BookingError::BalanceExceeded);
            }
        }

        // Fast path only; the partial unique index on the bookings table is
        // the authoritative guard against concurrent double-booking.
        if self
            .booking_repository
            .find_active_slot(trainer_id, client_id, session_time)
            .await
            .map_err(BookingError::Internal)?
            .is_some()
        {
            return Err(BookingError::DuplicateBooking);
        }

        let insert_booking_entity = InsertBookingEntity {
            trainer_id,
            client_id,
            session_time,
            status: BookingStatus::Confirmed.to_string(),
            session_cost_minor: charge_minor,
        };

        let booking = self
            .booking_repository
            .create(insert_booking_entity, charge_minor)
            .await
            .map_err(|err| match err {
                CreateBookingError::DuplicateSlot => BookingError::DuplicateBooking,
                CreateBookingError::Database(err) => {
                    error!(%client_id, %trainer_id, db_error = ?err, "bookings: insert failed");
                    BookingError::Internal(err)
                }
            })?;

        info!(booking_id = %booking.id, "bookings: session booked");
        Ok(BookingModel::from(booking))
    }

    pub async fn list_bookings(&self, client_id: Uuid) -> BookingResult<Vec<ClientBookingView>> {
        let rows = self
            .booking_repository
            .list_for_client(client_id)
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "bookings: failed to list bookings");
                BookingError::Internal(err)
            })?;

        Ok(rows.into_iter().map(ClientBookingView::from).collect())
    }

    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        requester_id: Uuid,
    ) -> BookingResult<BookingModel> {
        let booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await
            .map_err(BookingError::Internal)?
            .ok_or(BookingError::NotFound)?;

        if requester_id != booking.client_id && requester_id != booking.trainer_id {
            warn!(%booking_id, %requester_id, "bookings: cancel attempt by non-participant");
            return Err(BookingError::Forbidden);
        }

        let status = BookingStatus::try_from(booking.status.as_str())
            .map_err(BookingError::Internal)?;

        // Soft cancel is idempotent: a second cancel returns the record
        // unchanged instead of erroring.
        if status == BookingStatus::Cancelled {
            return Ok(BookingModel::from(booking));
        }

        if !status.can_transition_to(BookingStatus::Cancelled) {
            return Err(BookingError::InvalidInput(format!(
                "Cannot cancel a {} booking",
                status
            )));
        }

        // TODO: refund the charged balance_due once the refund policy for
        // cancellations is decided.
        let cancelled = self
            .booking_repository
            .cancel(booking_id)
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "bookings: cancel failed");
                BookingError::Internal(err)
            })?;

        info!(%booking_id, "bookings: booking cancelled");
        Ok(BookingModel::from(cancelled))
    }
}

/// Applies a percentage discount in integer minor units.
fn discounted_cost(cost_minor: i64, discount_percent: i64) -> i64 {
    let discount = discount_percent.clamp(0, 100);
    cost_minor - cost_minor * discount / 100
}

/// Calendar-month window containing `at`: [first of month, first of next month).
fn month_window(at: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = at.date_naive().with_day(1)?;
    let start = first.and_hms_opt(0, 0, 0)?.and_utc();
    let end = first
        .checked_add_months(Months::new(1))?
        .and_hms_opt(0, 0, 0)?
        .and_utc();
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use serde_json::json;

    use crate::domain::entities::bookings::BookingEntity;
    use crate::domain::entities::plans::PlanEntity;
    use crate::domain::entities::subscriptions::SubscriptionEntity;
    use crate::domain::entities::trainer_availability::AvailabilityEntity;
    use crate::domain::entities::trainers::TrainerEntity;
    use crate::domain::entities::users::UserEntity;
    use crate::domain::repositories::availability::MockAvailabilityRepository;
    use crate::domain::repositories::bookings::MockBookingRepository;
    use crate::domain::repositories::subscriptions::MockSubscriptionRepository;
    use crate::domain::repositories::trainers::MockTrainerRepository;
    use crate::domain::repositories::users::MockUserRepository;
    use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;

    fn session_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
    }

    fn sample_client(balance_due: i64, balance_limit: i64) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            username: "lena".to_string(),
            email: "lena@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            balance_due_minor: balance_due,
            balance_limit_minor: balance_limit,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_trainer(id: Uuid) -> TrainerEntity {
        TrainerEntity {
            id,
            username: "coach-mark".to_string(),
            email: "mark@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            specialties: vec!["strength".to_string()],
            experience_years: Some(7),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_availability(trainer_id: Uuid, times: &[DateTime<Utc>]) -> AvailabilityEntity {
        AvailabilityEntity {
            id: Uuid::new_v4(),
            trainer_id,
            slots: json!([{ "day": "monday", "times": times }]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn active_subscription(
        client_id: Uuid,
        discount_percent: i64,
        max_per_month: i64,
    ) -> (SubscriptionEntity, PlanEntity) {
        let plan_id = Uuid::new_v4();
        let now = Utc::now();
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            client_id,
            plan_id,
            starts_at: now,
            renews_at: now,
            ends_at: now + chrono::Duration::days(30),
            amount_paid_minor: 4900,
            status: SubscriptionStatus::Active.to_string(),
            canceled_at: None,
            created_at: now,
        };
        let plan = PlanEntity {
            id: plan_id,
            name: "premium".to_string(),
            price_minor: 4900,
            duration_days: 30,
            features: json!({
                "session_discount_percent": discount_percent,
                "max_bookings_per_month": max_per_month,
            }),
            is_active: true,
        };
        (subscription, plan)
    }

    fn booking_entity(
        trainer_id: Uuid,
        client_id: Uuid,
        session_time: DateTime<Utc>,
        status: &str,
    ) -> BookingEntity {
        BookingEntity {
            id: Uuid::new_v4(),
            trainer_id,
            client_id,
            session_time,
            status: status.to_string(),
            session_cost_minor: None,
            canceled_at: None,
            created_at: Utc::now(),
        }
    }

    fn request(trainer_id: Uuid, cost: Option<i64>) -> BookSessionModel {
        BookSessionModel {
            trainer_id: trainer_id.to_string(),
            session_time: session_instant().to_rfc3339(),
            session_cost_minor: cost,
        }
    }

    struct Mocks {
        bookings: MockBookingRepository,
        availability: MockAvailabilityRepository,
        subscriptions: MockSubscriptionRepository,
        users: MockUserRepository,
        trainers: MockTrainerRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                bookings: MockBookingRepository::new(),
                availability: MockAvailabilityRepository::new(),
                subscriptions: MockSubscriptionRepository::new(),
                users: MockUserRepository::new(),
                trainers: MockTrainerRepository::new(),
            }
        }

        fn into_usecase(
            self,
        ) -> BookingUseCase<
            MockBookingRepository,
            MockAvailabilityRepository,
            MockSubscriptionRepository,
            MockUserRepository,
            MockTrainerRepository,
        > {
            BookingUseCase::new(
                Arc::new(self.bookings),
                Arc::new(self.availability),
                Arc::new(self.subscriptions),
                Arc::new(self.users),
                Arc::new(self.trainers),
            )
        }
    }

    /// Wires the happy path up to (not including) the duplicate check.
    fn arm_happy_path(
        mocks: &mut Mocks,
        client: UserEntity,
        trainer_id: Uuid,
        discount_percent: i64,
        max_per_month: i64,
        already_booked: i64,
    ) {
        let client_id = client.id;
        mocks
            .users
            .expect_find_by_id()
            .with(eq(client_id))
            .returning(move |_| Ok(Some(client.clone())));
        mocks
            .trainers
            .expect_find_by_id()
            .with(eq(trainer_id))
            .returning(move |id| Ok(Some(sample_trainer(id))));
        mocks
            .availability
            .expect_find_by_trainer()
            .with(eq(trainer_id))
            .returning(move |id| Ok(Some(sample_availability(id, &[session_instant()]))));
        mocks
            .subscriptions
            .expect_find_active_for_client()
            .with(eq(client_id))
            .returning(move |id| Ok(Some(active_subscription(id, discount_percent, max_per_month))));
        mocks
            .bookings
            .expect_count_active_for_client_between()
            .returning(move |_, _, _| Ok(already_booked));
    }

    #[tokio::test]
    async fn fails_when_trainer_has_no_availability() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(0, 1000);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        mocks
            .users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));
        mocks
            .trainers
            .expect_find_by_id()
            .returning(move |id| Ok(Some(sample_trainer(id))));
        mocks
            .availability
            .expect_find_by_trainer()
            .with(eq(trainer_id))
            .returning(|_| Ok(None));

        let result = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, None))
            .await;

        assert!(matches!(result, Err(BookingError::AvailabilityNotSet)));
    }

    #[tokio::test]
    async fn fails_when_instant_not_in_slot_set() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(0, 1000);
        let client_id = client.id;
        let other_instant = session_instant() + chrono::Duration::hours(1);

        let mut mocks = Mocks::new();
        mocks
            .users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));
        mocks
            .trainers
            .expect_find_by_id()
            .returning(move |id| Ok(Some(sample_trainer(id))));
        mocks
            .availability
            .expect_find_by_trainer()
            .returning(move |id| Ok(Some(sample_availability(id, &[other_instant]))));

        let result = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, None))
            .await;

        assert!(matches!(result, Err(BookingError::SlotUnavailable)));
    }

    #[tokio::test]
    async fn books_a_declared_slot_and_charges_the_discounted_cost() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(190, 200);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        arm_happy_path(&mut mocks, client, trainer_id, 0, 10, 0);
        mocks
            .bookings
            .expect_find_active_slot()
            .returning(|_, _, _| Ok(None));
        mocks
            .bookings
            .expect_create()
            .withf(move |entity, charge| {
                entity.status == "confirmed"
                    && entity.session_time == session_instant()
                    && *charge == Some(10)
            })
            .returning(|entity, charge| {
                let mut created =
                    booking_entity(entity.trainer_id, entity.client_id, entity.session_time, "confirmed");
                created.session_cost_minor = charge;
                Ok(created)
            });

        let booking = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, Some(10)))
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.session_cost_minor, Some(10));
    }

    #[tokio::test]
    async fn refuses_charge_that_would_exceed_balance_limit() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(190, 200);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        arm_happy_path(&mut mocks, client, trainer_id, 0, 10, 0);

        let result = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, Some(15)))
            .await;

        assert!(matches!(result, Err(BookingError::BalanceExceeded)));
    }

    #[tokio::test]
    async fn applies_plan_discount_to_declared_cost() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(0, 10_000);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        arm_happy_path(&mut mocks, client, trainer_id, 25, 10, 0);
        mocks
            .bookings
            .expect_find_active_slot()
            .returning(|_, _, _| Ok(None));
        mocks
            .bookings
            .expect_create()
            .withf(|_, charge| *charge == Some(75))
            .returning(|entity, charge| {
                let mut created =
                    booking_entity(entity.trainer_id, entity.client_id, entity.session_time, "confirmed");
                created.session_cost_minor = charge;
                Ok(created)
            });

        let booking = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, Some(100)))
            .await
            .unwrap();

        assert_eq!(booking.session_cost_minor, Some(75));
    }

    #[tokio::test]
    async fn rejects_duplicate_slot_found_by_precheck() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(0, 1000);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        arm_happy_path(&mut mocks, client, trainer_id, 0, 10, 1);
        mocks
            .bookings
            .expect_find_active_slot()
            .returning(move |t, c, at| Ok(Some(booking_entity(t, c, at, "confirmed"))));

        let result = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, None))
            .await;

        assert!(matches!(result, Err(BookingError::DuplicateBooking)));
    }

    #[tokio::test]
    async fn maps_lost_uniqueness_race_to_duplicate_booking() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(0, 1000);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        arm_happy_path(&mut mocks, client, trainer_id, 0, 10, 0);
        mocks
            .bookings
            .expect_find_active_slot()
            .returning(|_, _, _| Ok(None));
        mocks
            .bookings
            .expect_create()
            .returning(|_, _| Err(CreateBookingError::DuplicateSlot));

        let result = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, None))
            .await;

        assert!(matches!(result, Err(BookingError::DuplicateBooking)));
    }

    #[tokio::test]
    async fn requires_an_active_subscription() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(0, 1000);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        mocks
            .users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));
        mocks
            .trainers
            .expect_find_by_id()
            .returning(move |id| Ok(Some(sample_trainer(id))));
        mocks
            .availability
            .expect_find_by_trainer()
            .returning(move |id| Ok(Some(sample_availability(id, &[session_instant()]))));
        mocks
            .subscriptions
            .expect_find_active_for_client()
            .returning(|_| Ok(None));

        let result = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, Some(10)))
            .await;

        assert!(matches!(result, Err(BookingError::SubscriptionRequired)));
    }

    #[tokio::test]
    async fn enforces_monthly_booking_cap() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(0, 1000);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        arm_happy_path(&mut mocks, client, trainer_id, 0, 10, 10);

        let result = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, None))
            .await;

        assert!(matches!(result, Err(BookingError::MonthlyLimitReached)));
    }

    #[tokio::test]
    async fn rejects_unparseable_session_time() {
        let mocks = Mocks::new();

        let result = mocks
            .into_usecase()
            .book_session(
                Uuid::new_v4(),
                BookSessionModel {
                    trainer_id: Uuid::new_v4().to_string(),
                    session_time: "next tuesday at nine".to_string(),
                    session_cost_minor: None,
                },
            )
            .await;

        assert!(matches!(result, Err(BookingError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn fails_for_unknown_trainer() {
        let trainer_id = Uuid::new_v4();
        let client = sample_client(0, 1000);
        let client_id = client.id;

        let mut mocks = Mocks::new();
        mocks
            .users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(client.clone())));
        mocks.trainers.expect_find_by_id().returning(|_| Ok(None));

        let result = mocks
            .into_usecase()
            .book_session(client_id, request(trainer_id, None))
            .await;

        assert!(matches!(result, Err(BookingError::TrainerNotFound)));
    }

    #[tokio::test]
    async fn cancelling_missing_booking_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.bookings.expect_find_by_id().returning(|_| Ok(None));

        let result = mocks
            .into_usecase()
            .cancel_booking(Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(BookingError::NotFound)));
    }

    #[tokio::test]
    async fn cancelling_as_non_participant_is_forbidden() {
        let mut mocks = Mocks::new();
        mocks.bookings.expect_find_by_id().returning(|id| {
            let mut entity =
                booking_entity(Uuid::new_v4(), Uuid::new_v4(), session_instant(), "confirmed");
            entity.id = id;
            Ok(Some(entity))
        });

        let result = mocks
            .into_usecase()
            .cancel_booking(Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(BookingError::Forbidden)));
    }

    #[tokio::test]
    async fn cancel_is_idempotent_for_already_cancelled_bookings() {
        let client_id = Uuid::new_v4();
        let mut mocks = Mocks::new();
        // No cancel expectation: a second cancel must not touch the store.
        mocks.bookings.expect_find_by_id().returning(move |id| {
            let mut entity =
                booking_entity(Uuid::new_v4(), client_id, session_instant(), "cancelled");
            entity.id = id;
            entity.canceled_at = Some(Utc::now());
            Ok(Some(entity))
        });

        let booking = mocks
            .into_usecase()
            .cancel_booking(Uuid::new_v4(), client_id)
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert!(booking.canceled_at.is_some());
    }

    #[tokio::test]
    async fn participant_can_cancel_a_confirmed_booking() {
        let client_id = Uuid::new_v4();
        let booking_id = Uuid::new_v4();

        let mut mocks = Mocks::new();
        mocks.bookings.expect_find_by_id().returning(move |id| {
            let mut entity =
                booking_entity(Uuid::new_v4(), client_id, session_instant(), "confirmed");
            entity.id = id;
            Ok(Some(entity))
        });
        mocks
            .bookings
            .expect_cancel()
            .with(eq(booking_id))
            .returning(move |id| {
                let mut entity =
                    booking_entity(Uuid::new_v4(), client_id, session_instant(), "cancelled");
                entity.id = id;
                entity.canceled_at = Some(Utc::now());
                Ok(entity)
            });

        let booking = mocks
            .into_usecase()
            .cancel_booking(booking_id, client_id)
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Cancelled);
    }

    #[test]
    fn month_window_spans_the_calendar_month() {
        let at = Utc.with_ymd_and_hms(2025, 6, 17, 13, 45, 0).unwrap();
        let (start, end) = month_window(at).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn december_window_rolls_into_january() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let (start, end) = month_window(at).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn discount_math_rounds_in_the_clients_favor() {
        assert_eq!(discounted_cost(100, 25), 75);
        assert_eq!(discounted_cost(99, 10), 90);
        assert_eq!(discounted_cost(10, 0), 10);
        assert_eq!(discounted_cost(10, 150), 0);
    }
}
