use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::roles::Role;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupModel {
    pub role: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub specialties: Option<Vec<String>>,
    pub experience_years: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginModel {
    pub role: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupResponseModel {
    pub id: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentitySummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponseModel {
    pub token: String,
    pub user: IdentitySummary,
}
