//! In-process mall store. Used by tests and by `MALL_STORE=memory`.

use crate::error::AppError;
use crate::model::{Mall, MallInput};
use crate::store::MallStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Mall>,
    /// Last id handed out; mirrors a BIGSERIAL sequence.
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryMallStore {
    inner: RwLock<Inner>,
}

impl MemoryMallStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn filter<P>(&self, pred: P) -> Vec<Mall>
    where
        P: Fn(&Mall) -> bool + Send,
    {
        let inner = self.inner.read().await;
        inner.rows.values().filter(|m| pred(m)).cloned().collect()
    }

    async fn first<P>(&self, pred: P) -> Option<Mall>
    where
        P: Fn(&Mall) -> bool + Send,
    {
        let inner = self.inner.read().await;
        inner.rows.values().find(|m| pred(m)).cloned()
    }
}

#[async_trait]
impl MallStore for MemoryMallStore {
    async fn list_all(&self) -> Result<Vec<Mall>, AppError> {
        Ok(self.filter(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Mall>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Mall>, AppError> {
        Ok(self.first(|m| m.name == name).await)
    }

    async fn find_by_score(&self, score: i32) -> Result<Vec<Mall>, AppError> {
        Ok(self.filter(|m| m.score == score).await)
    }

    async fn find_by_location(&self, location: &str) -> Result<Option<Mall>, AppError> {
        Ok(self.first(|m| m.location == location).await)
    }

    async fn find_by_restaurants(&self, has_restaurants: bool) -> Result<Vec<Mall>, AppError> {
        Ok(self.filter(|m| m.has_restaurants == has_restaurants).await)
    }

    async fn list_names(&self) -> Result<Vec<String>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().map(|m| m.name.clone()).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.rows.len() as i64)
    }

    async fn find_by_min_score(&self, min_score: i32) -> Result<Vec<Mall>, AppError> {
        Ok(self.filter(|m| m.score >= min_score).await)
    }

    async fn insert(&self, input: &MallInput) -> Result<Mall, AppError> {
        let mut inner = self.inner.write().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("id space exhausted".into()))?;
        inner.last_id = id;
        let mall = input.clone().into_mall(id);
        inner.rows.insert(id, mall.clone());
        Ok(mall)
    }

    async fn upsert(&self, id: i64, input: &MallInput) -> Result<Mall, AppError> {
        let mut inner = self.inner.write().await;
        let mall = input.clone().into_mall(id);
        inner.rows.insert(id, mall.clone());
        if id > inner.last_id {
            inner.last_id = id;
        }
        Ok(mall)
    }

    async fn delete(&self, id: i64) -> Result<Option<Mall>, AppError> {
        Ok(self.inner.write().await.rows.remove(&id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
