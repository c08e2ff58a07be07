use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub questions_per_interview: i64,
    pub min_score_to_pass: f64,
    pub gigachat_credentials: Option<String>,
    pub gigachat_scope: String,
    pub gigachat_model: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            token_ttl_days: get_env_parse_or("TOKEN_TTL_DAYS", 30)?,
            questions_per_interview: get_env_parse_or("QUESTIONS_PER_INTERVIEW", 10)?,
            min_score_to_pass: get_env_parse_or("MIN_SCORE_TO_PASS", 0.6)?,
            gigachat_credentials: env::var("GIGACHAT_CREDENTIALS").ok(),
            gigachat_scope: get_env_or("GIGACHAT_SCOPE", "GIGACHAT_API_PERS"),
            gigachat_model: get_env_or("GIGACHAT_MODEL", "GigaChat"),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
