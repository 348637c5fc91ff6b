//! Record store for malls: one trait, a PostgreSQL backend and an in-memory backend.

mod memory;
mod postgres;

pub use memory::MemoryMallStore;
pub use postgres::{ensure_database_exists, PgMallStore};

use crate::error::AppError;
use crate::model::{Mall, MallInput};
use async_trait::async_trait;

/// CRUD and predicate queries over the mall table. Sequences come back in id order.
#[async_trait]
pub trait MallStore: Send + Sync + 'static {
    async fn list_all(&self) -> Result<Vec<Mall>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Mall>, AppError>;

    /// First mall (lowest id) whose name equals `name`.
    async fn find_by_name(&self, name: &str) -> Result<Option<Mall>, AppError>;

    async fn find_by_score(&self, score: i32) -> Result<Vec<Mall>, AppError>;

    /// First mall (lowest id) whose location equals `location`.
    async fn find_by_location(&self, location: &str) -> Result<Option<Mall>, AppError>;

    async fn find_by_restaurants(&self, has_restaurants: bool) -> Result<Vec<Mall>, AppError>;

    async fn list_names(&self) -> Result<Vec<String>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    /// Malls with `score >= min_score`.
    async fn find_by_min_score(&self, min_score: i32) -> Result<Vec<Mall>, AppError>;

    /// Store a new mall; the store assigns the id.
    async fn insert(&self, input: &MallInput) -> Result<Mall, AppError>;

    /// Create the mall with `id` if absent, otherwise overwrite its fields. Later inserts never reuse `id`.
    async fn upsert(&self, id: i64, input: &MallInput) -> Result<Mall, AppError>;

    /// Remove the mall and return what was stored, or None if no such id.
    async fn delete(&self, id: i64) -> Result<Option<Mall>, AppError>;

    /// Cheap liveness probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
