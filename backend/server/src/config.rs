use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use axum::http::HeaderValue;
use tracing::{info, warn};

use crate::error::ConfigError;

pub struct Config {
    pub port: u16,
    pub items_path: PathBuf,
    pub frontend_origin: HeaderValue,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "RUST_PORT", "3001")?,
            items_path: try_load(&lookup, "ITEMS_PATH", "data/items.json")?,
            frontend_origin: try_load(&lookup, "FRONTEND_ORIGIN", "http://localhost:3000")?,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                reason: e.to_string(),
            }
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::load_from(lookup(&[])).unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.items_path, PathBuf::from("data/items.json"));
        assert_eq!(config.frontend_origin, "http://localhost:3000");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::load_from(lookup(&[
            ("RUST_PORT", "8080"),
            ("ITEMS_PATH", "/srv/catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.items_path, PathBuf::from("/srv/catalog.json"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::load_from(lookup(&[("RUST_PORT", "not-a-port")]))
            .err()
            .unwrap();

        assert!(matches!(err, ConfigError::Invalid { key: "RUST_PORT", .. }));
    }
}
