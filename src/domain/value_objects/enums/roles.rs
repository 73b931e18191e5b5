use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Account kinds carried in token claims. Capability checks match on this
/// enum instead of inspecting raw role strings per route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Client,
    Trainer,
    GymOwner,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = match self {
            Role::Client => "client",
            Role::Trainer => "trainer",
            Role::GymOwner => "gym_owner",
        };
        write!(f, "{}", role)
    }
}

impl TryFrom<&str> for Role {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "client" => Ok(Role::Client),
            "trainer" => Ok(Role::Trainer),
            "gym_owner" => Ok(Role::GymOwner),
            _ => Err(anyhow::anyhow!("Invalid role: {}", value)),
        }
    }
}
