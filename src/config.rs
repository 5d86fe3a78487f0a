use std::path::PathBuf;

use crate::middleware::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_file: PathBuf,
    pub codes_file: PathBuf,
    pub master_code: String,
    pub session_key: String,
    pub session_secret: String,
    pub code_ttl_hours: u32,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; secrets have no fallback.
    pub fn from_vars<F>(var: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| match var(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(AppError::Config {
                description: format!("Missing {name} in env"),
            }),
        };

        let master_code = required("MASTER_CODE")?;
        let session_secret = required("SESSION_SECRET")?;
        let session_key = var("SESSION_KEY").unwrap_or("hobby_session".to_string());

        let port = parse_or(var("PORT"), "PORT", 3000)?;
        let code_ttl_hours = parse_or(var("CODE_TTL_HOURS"), "CODE_TTL_HOURS", 24)?;
        if code_ttl_hours == 0 {
            return Err(AppError::Config {
                description: "CODE_TTL_HOURS must be positive".to_string(),
            });
        }

        let data_file = PathBuf::from(var("DATA_FILE").unwrap_or("data.json".to_string()));
        let codes_file = PathBuf::from(var("CODES_FILE").unwrap_or("codes.json".to_string()));

        let cors_origins = var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            data_file,
            codes_file,
            master_code,
            session_key,
            session_secret,
            code_ttl_hours,
            cors_origins,
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, name: &str, default: T) -> AppResult<T> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse::<T>().map_err(|_| AppError::Config {
            description: format!("{name} must be number"),
        }),
    }
}
