use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth;
use crate::auth::password;
use crate::config::config_model::AuthSecret;
use crate::domain::entities::gym_owners::InsertGymOwnerEntity;
use crate::domain::entities::trainers::InsertTrainerEntity;
use crate::domain::entities::users::InsertUserEntity;
use crate::domain::repositories::gym_owners::GymOwnerRepository;
use crate::domain::repositories::trainers::TrainerRepository;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::enums::roles::Role;
use crate::domain::value_objects::identity::{
    IdentitySummary, LoginModel, LoginResponseModel, SignupModel, SignupResponseModel,
};

/// Fresh clients may run a tab up to this amount before bookings are refused.
const DEFAULT_BALANCE_LIMIT_MINOR: i64 = 20_000;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("unknown role")]
    InvalidRole,
    #[error("{0}")]
    WeakPassword(String),
    #[error("an account already exists with this email")]
    AlreadyExists,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IdentityError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            IdentityError::InvalidRole
            | IdentityError::WeakPassword(_)
            | IdentityError::AlreadyExists
            | IdentityError::InvalidCredentials => StatusCode::BAD_REQUEST,
            IdentityError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type IdentityResult<T> = std::result::Result<T, IdentityError>;

pub struct IdentityUseCase<U, T, G>
where
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    G: GymOwnerRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    trainer_repository: Arc<T>,
    gym_owner_repository: Arc<G>,
    auth_secret: AuthSecret,
}

impl<U, T, G> IdentityUseCase<U, T, G>
where
    U: UserRepository + Send + Sync + 'static,
    T: TrainerRepository + Send + Sync + 'static,
    G: GymOwnerRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        trainer_repository: Arc<T>,
        gym_owner_repository: Arc<G>,
        auth_secret: AuthSecret,
    ) -> Self {
        Self {
            user_repository,
            trainer_repository,
            gym_owner_repository,
            auth_secret,
        }
    }

    pub async fn signup(&self, model: SignupModel) -> IdentityResult<SignupResponseModel> {
        let role =
            Role::try_from(model.role.as_str()).map_err(|_| IdentityError::InvalidRole)?;
        password::validate_password_strength(&model.password)
            .map_err(IdentityError::WeakPassword)?;

        let password_hash = password::hash_password(&model.password)?;

        let id = match role {
            Role::Client => {
                if self
                    .user_repository
                    .find_by_email(&model.email)
                    .await
                    .map_err(IdentityError::Internal)?
                    .is_some()
                {
                    return Err(IdentityError::AlreadyExists);
                }
                self.user_repository
                    .insert(InsertUserEntity {
                        username: model.username,
                        email: model.email,
                        password_hash,
                        balance_due_minor: 0,
                        balance_limit_minor: DEFAULT_BALANCE_LIMIT_MINOR,
                    })
                    .await
                    .map_err(IdentityError::Internal)?
            }
            Role::Trainer => {
                if self
                    .trainer_repository
                    .find_by_email(&model.email)
                    .await
                    .map_err(IdentityError::Internal)?
                    .is_some()
                {
                    return Err(IdentityError::AlreadyExists);
                }
                self.trainer_repository
                    .insert(InsertTrainerEntity {
                        username: model.username,
                        email: model.email,
                        password_hash,
                        specialties: model.specialties.unwrap_or_default(),
                        experience_years: model.experience_years,
                    })
                    .await
                    .map_err(IdentityError::Internal)?
            }
            Role::GymOwner => {
                if self
                    .gym_owner_repository
                    .find_by_email(&model.email)
                    .await
                    .map_err(IdentityError::Internal)?
                    .is_some()
                {
                    return Err(IdentityError::AlreadyExists);
                }
                self.gym_owner_repository
                    .insert(InsertGymOwnerEntity {
                        username: model.username,
                        email: model.email,
                        password_hash,
                    })
                    .await
                    .map_err(IdentityError::Internal)?
            }
        };

        info!(%id, %role, "identity: account registered");
        Ok(SignupResponseModel { id, role })
    }

    pub async fn login(&self, model: LoginModel) -> IdentityResult<LoginResponseModel> {
        let role =
            Role::try_from(model.role.as_str()).map_err(|_| IdentityError::InvalidRole)?;

        // One credential record shape regardless of which table backs it, so
        // unknown email and wrong password are indistinguishable to callers.
        let credentials = match role {
            Role::Client => self
                .user_repository
                .find_by_email(&model.email)
                .await
                .map_err(IdentityError::Internal)?
                .map(|user| (user.id, user.username, user.email, user.password_hash)),
            Role::Trainer => self
                .trainer_repository
                .find_by_email(&model.email)
                .await
                .map_err(IdentityError::Internal)?
                .map(|trainer| (trainer.id, trainer.username, trainer.email, trainer.password_hash)),
            Role::GymOwner => self
                .gym_owner_repository
                .find_by_email(&model.email)
                .await
                .map_err(IdentityError::Internal)?
                .map(|owner| (owner.id, owner.username, owner.email, owner.password_hash)),
        };

        let (id, username, email, password_hash) = credentials.ok_or_else(|| {
            warn!(role = %role, "identity: login with unknown email");
            IdentityError::InvalidCredentials
        })?;

        if !password::verify_password(&model.password, &password_hash)? {
            warn!(%id, "identity: wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        let token = auth::issue_token(id, role, &self.auth_secret).map_err(|err| {
            error!(%id, token_error = ?err, "identity: token issuance failed");
            IdentityError::Internal(err)
        })?;

        info!(%id, %role, "identity: login succeeded");
        Ok(LoginResponseModel {
            token,
            user: IdentitySummary {
                id,
                username,
                email,
                role,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::domain::entities::users::UserEntity;
    use crate::domain::repositories::gym_owners::MockGymOwnerRepository;
    use crate::domain::repositories::trainers::MockTrainerRepository;
    use crate::domain::repositories::users::MockUserRepository;

    fn secret() -> AuthSecret {
        AuthSecret {
            jwt_secret: "supersecretjwtsecretforunittesting123".to_string(),
            token_ttl_secs: 3600,
        }
    }

    fn usecase(
        users: MockUserRepository,
        trainers: MockTrainerRepository,
        owners: MockGymOwnerRepository,
    ) -> IdentityUseCase<MockUserRepository, MockTrainerRepository, MockGymOwnerRepository> {
        IdentityUseCase::new(Arc::new(users), Arc::new(trainers), Arc::new(owners), secret())
    }

    fn client_with_password(email: &str, password: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            username: "lena".to_string(),
            email: email.to_string(),
            password_hash: password::hash_password(password).unwrap(),
            balance_due_minor: 0,
            balance_limit_minor: DEFAULT_BALANCE_LIMIT_MINOR,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn signup_model(role: &str, password: &str) -> SignupModel {
        SignupModel {
            role: role.to_string(),
            username: "lena".to_string(),
            email: "lena@example.com".to_string(),
            password: password.to_string(),
            specialties: None,
            experience_years: None,
        }
    }

    #[tokio::test]
    async fn rejects_unknown_role() {
        let usecase = usecase(
            MockUserRepository::new(),
            MockTrainerRepository::new(),
            MockGymOwnerRepository::new(),
        );

        let result = usecase.signup(signup_model("admin", "long-enough-pw")).await;
        assert!(matches!(result, Err(IdentityError::InvalidRole)));
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let usecase = usecase(
            MockUserRepository::new(),
            MockTrainerRepository::new(),
            MockGymOwnerRepository::new(),
        );

        let result = usecase.signup(signup_model("client", "short")).await;
        assert!(matches!(result, Err(IdentityError::WeakPassword(_))));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(client_with_password(email, "long-enough-pw"))));

        let usecase = usecase(users, MockTrainerRepository::new(), MockGymOwnerRepository::new());
        let result = usecase.signup(signup_model("client", "long-enough-pw")).await;

        assert!(matches!(result, Err(IdentityError::AlreadyExists)));
    }

    #[tokio::test]
    async fn signup_stores_a_hash_not_the_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_insert()
            .withf(|entity| {
                entity.password_hash.starts_with("$argon2id$")
                    && entity.balance_due_minor == 0
                    && entity.balance_limit_minor == DEFAULT_BALANCE_LIMIT_MINOR
            })
            .returning(|_| Ok(Uuid::new_v4()));

        let usecase = usecase(users, MockTrainerRepository::new(), MockGymOwnerRepository::new());
        let response = usecase
            .signup(signup_model("client", "long-enough-pw"))
            .await
            .unwrap();

        assert_eq!(response.role, Role::Client);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_invalid_credentials() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(client_with_password(email, "the-right-password"))));

        let usecase = usecase(users, MockTrainerRepository::new(), MockGymOwnerRepository::new());
        let result = usecase
            .login(LoginModel {
                role: "client".to_string(),
                email: "lena@example.com".to_string(),
                password: "the-wrong-password".to_string(),
            })
            .await;

        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn login_issues_a_token_carrying_the_role() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|email| Ok(Some(client_with_password(email, "the-right-password"))));

        let usecase = usecase(users, MockTrainerRepository::new(), MockGymOwnerRepository::new());
        let response = usecase
            .login(LoginModel {
                role: "client".to_string(),
                email: "lena@example.com".to_string(),
                password: "the-right-password".to_string(),
            })
            .await
            .unwrap();

        let claims = auth::verify_token(&response.token, &secret().jwt_secret).unwrap();
        assert_eq!(claims.sub, response.user.id);
        assert_eq!(claims.role, "client");
    }
}
