use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub photos_url: String,
    pub placeholder_api_url: String,
    pub http_timeout: Duration,
    pub frontend_dir: String,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: try_load(&lookup, "PORT", 3000),
            photos_url: try_load(&lookup, "PHOTOS_URL", "http://localhost:3001/photos".to_string()),
            placeholder_api_url: try_load(
                &lookup,
                "PLACEHOLDER_API_URL",
                "https://jsonplaceholder.typicode.com".to_string(),
            ),
            http_timeout: Duration::from_secs(try_load(&lookup, "HTTP_TIMEOUT_SECS", 10)),
            frontend_dir: try_load(&lookup, "FRONTEND_DIR", "frontend/dist".to_string()),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
