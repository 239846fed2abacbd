use crate::error::StartupError;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub frontend_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        let port = match env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => 5000,
        };
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port,
            jwt_secret: required("JWT_SECRET")?,
            frontend_origins: parse_origins(&env::var("FRONTEND_ORIGINS").unwrap_or_default()),
        })
    }
}

fn required(key: &str) -> Result<String, StartupError> {
    env::var(key).map_err(|_| StartupError::Config(format!("{} must be set", key)))
}

fn parse_port(raw: &str) -> Result<u16, StartupError> {
    raw.trim()
        .parse()
        .map_err(|_| StartupError::Config(format!("PORT must be a number, got '{}'", raw)))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
