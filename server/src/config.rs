use std::net::{IpAddr, Ipv4Addr};

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub seed_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            cors_allowed_origins: Vec::new(),
            seed_on_start: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = match lookup("BIND_HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid BIND_HOST {raw:?}"))?,
            None => defaults.host,
        };
        let port = match lookup("BIND_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid BIND_PORT {raw:?}"))?,
            None => defaults.port,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let seed_on_start = lookup("SEED_ON_START")
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed_on_start);

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            seed_on_start,
        })
    }
}
