//! Mall API: REST service for shopping mall records.

pub mod config;
pub mod error;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreBackend, TableConfig};
pub use error::{AppError, ConfigError};
pub use guard::AccessGuard;
pub use model::{Mall, MallInput};
pub use routes::{app, common_routes, mall_routes};
pub use service::MallService;
pub use state::AppState;
pub use store::{ensure_database_exists, MallStore, MemoryMallStore, PgMallStore};
