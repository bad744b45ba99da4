use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Company logo placed in the header of every generated CV.
    pub logo_path: PathBuf,
    pub max_upload_bytes: usize,
    /// Accepted candidate age range (inclusive), enforced at the form boundary.
    pub min_age: u32,
    pub max_age: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            logo_path: std::env::var("LOGO_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets/logo.png")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            min_age: parse_env("MIN_AGE", 18)?,
            max_age: parse_env("MAX_AGE", 99)?,
        };

        anyhow::ensure!(
            config.min_age <= config.max_age,
            "MIN_AGE ({}) must not exceed MAX_AGE ({})",
            config.min_age,
            config.max_age
        );

        Ok(config)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Defaults without touching the process environment.
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            logo_path: PathBuf::from("assets/logo.png"),
            max_upload_bytes: 10 * 1024 * 1024,
            min_age: 18,
            max_age: 99,
        }
    }
}
