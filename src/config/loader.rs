//! Load settings from the process environment or any key lookup.

use crate::config::types::*;
use crate::config::{normalize_base_path, validate_identifier};
use crate::error::ConfigError;
use std::str::FromStr;

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from a key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_token = get("MALL_API_TOKEN").ok_or(ConfigError::Missing("MALL_API_TOKEN"))?;

        let store = match get("MALL_STORE") {
            Some(s) => StoreBackend::from_str(&s).map_err(|reason| ConfigError::Invalid {
                var: "MALL_STORE",
                reason,
            })?,
            None => StoreBackend::Postgres,
        };

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }

        let schema = get("MALL_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        validate_identifier("MALL_SCHEMA", &schema)?;
        let table = get("MALL_TABLE").unwrap_or_else(|| DEFAULT_TABLE.into());
        validate_identifier("MALL_TABLE", &table)?;

        let bind_addr = parse_or(
            "BIND_ADDR",
            get("BIND_ADDR"),
            DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: "bad default".into(),
            })?,
        )?;
        let base_path = normalize_base_path(
            "BASE_PATH",
            &get("BASE_PATH").unwrap_or_else(|| DEFAULT_BASE_PATH.into()),
        )?;
        let body_limit_bytes = parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT_BYTES)?;

        Ok(AppConfig {
            api_token,
            store,
            database_url,
            max_connections,
            table: TableConfig { schema, table },
            bind_addr,
            base_path,
            body_limit_bytes,
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: format!("'{}': {}", s, e),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn token_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("MALL_API_TOKEN"))));
        assert!(matches!(load(&[("MALL_API_TOKEN", "  ")]), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn defaults_apply() {
        let cfg = load(&[("MALL_API_TOKEN", "t0k3n")]).unwrap();
        assert_eq!(cfg.api_token, "t0k3n");
        assert_eq!(cfg.store, StoreBackend::Postgres);
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.table, TableConfig::default());
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.base_path, "/api/centrocomercial");
        assert_eq!(cfg.body_limit_bytes, 65536);
    }

    #[test]
    fn overrides_are_read() {
        let cfg = load(&[
            ("MALL_API_TOKEN", "secret"),
            ("MALL_STORE", "memory"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("MALL_SCHEMA", "retail"),
            ("MALL_TABLE", "malls"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("BASE_PATH", "malls/"),
        ])
        .unwrap();
        assert_eq!(cfg.store, StoreBackend::Memory);
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.table.schema, "retail");
        assert_eq!(cfg.table.table, "malls");
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(cfg.base_path, "/malls");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("MALL_API_TOKEN", "x"), ("MALL_STORE", "redis")]),
            Err(ConfigError::Invalid { var: "MALL_STORE", .. })
        ));
        assert!(matches!(
            load(&[("MALL_API_TOKEN", "x"), ("DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", .. })
        ));
        assert!(matches!(
            load(&[("MALL_API_TOKEN", "x"), ("MALL_TABLE", "malls; drop")]),
            Err(ConfigError::Invalid { var: "MALL_TABLE", .. })
        ));
        assert!(matches!(
            load(&[("MALL_API_TOKEN", "x"), ("BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { var: "BIND_ADDR", .. })
        ));
    }
}
