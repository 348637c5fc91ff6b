//! PostgreSQL-backed mall store and database bootstrap.

use crate::config::TableConfig;
use crate::error::{AppError, ConfigError};
use crate::model::{Mall, MallInput};
use crate::sql::MallStatements;
use crate::store::MallStore;
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgMallStore {
    pool: PgPool,
    stmts: MallStatements,
}

impl PgMallStore {
    pub fn new(pool: PgPool, table: &TableConfig) -> Self {
        PgMallStore {
            pool,
            stmts: MallStatements::new(table),
        }
    }

    /// Create the mall table if it does not exist yet.
    pub async fn ensure_table(&self) -> Result<(), AppError> {
        tracing::debug!(sql = %self.stmts.create_table, "ddl");
        sqlx::query(&self.stmts.create_table).execute(&self.pool).await?;
        tracing::info!(table = %self.stmts.table, "mall table ready");
        Ok(())
    }

    async fn fetch_many(&self, sql: &str, bind: Bind<'_>) -> Result<Vec<Mall>, AppError> {
        tracing::debug!(sql = %sql, param = ?bind, "query");
        let q = sqlx::query_as::<_, Mall>(sql);
        let rows = match bind {
            Bind::None => q.fetch_all(&self.pool).await?,
            Bind::Text(s) => q.bind(s).fetch_all(&self.pool).await?,
            Bind::Int(n) => q.bind(n).fetch_all(&self.pool).await?,
            Bind::Bool(b) => q.bind(b).fetch_all(&self.pool).await?,
        };
        Ok(rows)
    }

    async fn fetch_optional(&self, sql: &str, bind: Bind<'_>) -> Result<Option<Mall>, AppError> {
        tracing::debug!(sql = %sql, param = ?bind, "query");
        let q = sqlx::query_as::<_, Mall>(sql);
        let row = match bind {
            Bind::None => q.fetch_optional(&self.pool).await?,
            Bind::Text(s) => q.bind(s).fetch_optional(&self.pool).await?,
            Bind::Int(n) => q.bind(n).fetch_optional(&self.pool).await?,
            Bind::Bool(b) => q.bind(b).fetch_optional(&self.pool).await?,
        };
        Ok(row)
    }
}

/// Single parameter for a lookup statement.
#[derive(Debug)]
enum Bind<'a> {
    None,
    Text(&'a str),
    Int(i32),
    Bool(bool),
}

#[async_trait]
impl MallStore for PgMallStore {
    async fn list_all(&self) -> Result<Vec<Mall>, AppError> {
        self.fetch_many(&self.stmts.select_all, Bind::None).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Mall>, AppError> {
        tracing::debug!(sql = %self.stmts.select_by_id, id, "query");
        let row = sqlx::query_as::<_, Mall>(&self.stmts.select_by_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Mall>, AppError> {
        self.fetch_optional(&self.stmts.select_by_name, Bind::Text(name)).await
    }

    async fn find_by_score(&self, score: i32) -> Result<Vec<Mall>, AppError> {
        self.fetch_many(&self.stmts.select_by_score, Bind::Int(score)).await
    }

    async fn find_by_location(&self, location: &str) -> Result<Option<Mall>, AppError> {
        self.fetch_optional(&self.stmts.select_by_location, Bind::Text(location)).await
    }

    async fn find_by_restaurants(&self, has_restaurants: bool) -> Result<Vec<Mall>, AppError> {
        self.fetch_many(&self.stmts.select_by_restaurants, Bind::Bool(has_restaurants)).await
    }

    async fn list_names(&self) -> Result<Vec<String>, AppError> {
        tracing::debug!(sql = %self.stmts.select_names, "query");
        let names = sqlx::query_scalar::<_, String>(&self.stmts.select_names)
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    async fn count(&self) -> Result<i64, AppError> {
        tracing::debug!(sql = %self.stmts.count, "query");
        let n = sqlx::query_scalar::<_, i64>(&self.stmts.count)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn find_by_min_score(&self, min_score: i32) -> Result<Vec<Mall>, AppError> {
        self.fetch_many(&self.stmts.select_by_min_score, Bind::Int(min_score)).await
    }

    async fn insert(&self, input: &MallInput) -> Result<Mall, AppError> {
        tracing::debug!(sql = %self.stmts.insert, input = ?input, "query");
        let row = sqlx::query_as::<_, Mall>(&self.stmts.insert)
            .bind(&input.name)
            .bind(input.score)
            .bind(&input.location)
            .bind(input.has_restaurants)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn upsert(&self, id: i64, input: &MallInput) -> Result<Mall, AppError> {
        tracing::debug!(sql = %self.stmts.upsert, id, input = ?input, "query (tx)");
        let mut tx = self.pool.begin().await?;
        sqlx::query(&self.stmts.lock_table).execute(&mut *tx).await?;
        let row = sqlx::query_as::<_, Mall>(&self.stmts.upsert)
            .bind(id)
            .bind(&input.name)
            .bind(input.score)
            .bind(&input.location)
            .bind(input.has_restaurants)
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query(&self.stmts.advance_sequence)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<Option<Mall>, AppError> {
        tracing::debug!(sql = %self.stmts.delete, id, "query");
        let row = sqlx::query_as::<_, Mall>(&self.stmts.delete)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Connect to the server's `postgres` database and create the database named in `database_url` if it is missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_options(database_url)?;
    let db_name = match db_name {
        Some(name) if !name.is_empty() && name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the same server's `postgres` database, plus the database the URL names.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::Invalid {
        var: "DATABASE_URL",
        reason: e.to_string(),
    })?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
