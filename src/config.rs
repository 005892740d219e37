use std::collections::HashMap;

use crate::{errors::AppError, models::RatingBounds};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
    pub rating_bounds: RatingBounds,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up
    /// a local `.env` file.
    pub fn from_env() -> Result<Self, AppError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, AppError> {
        let redis_url = required(vars, "REDIS_URL")?;
        let jwt_secret = required(vars, "JWT_SECRET")?;

        let port = parsed(vars, "PORT")?.unwrap_or(DEFAULT_PORT);

        let allowed_origins = vars
            .get("ALLOWED_ORIGINS")
            .map(String::as_str)
            .unwrap_or(DEFAULT_ALLOWED_ORIGINS)
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let rate_limit_per_minute =
            parsed(vars, "RATE_LIMIT_PER_MINUTE")?.unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE);
        if rate_limit_per_minute == 0 {
            return Err(AppError::EnvError(
                "RATE_LIMIT_PER_MINUTE must be greater than 0".into(),
            ));
        }

        let defaults = RatingBounds::default();
        let rating_bounds = RatingBounds::new(
            parsed(vars, "RATING_MIN")?.unwrap_or(defaults.min),
            parsed(vars, "RATING_MAX")?.unwrap_or(defaults.max),
        )?;

        Ok(Self {
            redis_url,
            jwt_secret,
            port,
            allowed_origins,
            rate_limit_per_minute,
            rating_bounds,
        })
    }
}

fn required(vars: &HashMap<String, String>, key: &str) -> Result<String, AppError> {
    vars.get(key)
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| AppError::EnvError(format!("{key} must be set")))
}

fn parsed<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, AppError> {
    vars.get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| AppError::EnvError(format!("{key} has an invalid value: {raw}")))
        })
        .transpose()
}
