use anyhow::{Ok, Result};

use super::config_model::{AuthSecret, Database, DotEnvyConfig, Server};
use super::stage::Stage;

const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    Ok(DotEnvyConfig { server, database })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(stage_str.as_str()).unwrap_or_default()
}

pub fn get_auth_secret() -> Result<AuthSecret> {
    dotenvy::dotenv().ok();

    let token_ttl_secs = std::env::var("JWT_TOKEN_TTL_SECS")
        .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_SECS.to_string())
        .parse()?;

    Ok(AuthSecret {
        jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
        token_ttl_secs,
    })
}
