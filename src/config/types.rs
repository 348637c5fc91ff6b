//! Runtime settings for the mall service.

use std::net::SocketAddr;

/// Which record store backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via sqlx (default).
    Postgres,
    /// In-process map; contents are lost on restart.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store '{}' (expected postgres or memory)", other)),
        }
    }
}

/// Location of the mall table inside the database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub schema: String,
    pub table: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            schema: DEFAULT_SCHEMA.into(),
            table: DEFAULT_TABLE.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Secret expected in the `token` query parameter of mutating requests.
    pub api_token: String,
    pub store: StoreBackend,
    pub database_url: String,
    pub max_connections: u32,
    pub table: TableConfig,
    pub bind_addr: SocketAddr,
    /// Prefix under which the mall routes are nested, e.g. `/api/centrocomercial`.
    pub base_path: String,
    pub body_limit_bytes: usize,
}

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/malls";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_TABLE: &str = "centrocomercial";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BASE_PATH: &str = "/api/centrocomercial";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;
