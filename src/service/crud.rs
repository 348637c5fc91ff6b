//! Create, update and delete over a `MallStore`. Reads go straight to the store.

use crate::error::AppError;
use crate::model::{Mall, MallInput};
use crate::store::MallStore;

pub struct MallService;

/// Result of an update: the target either existed and was overwritten, or was created with the requested id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Mall),
    Created(Mall),
}

impl UpdateOutcome {
    pub fn into_mall(self) -> Mall {
        match self {
            UpdateOutcome::Updated(m) | UpdateOutcome::Created(m) => m,
        }
    }
}

impl MallService {
    /// Store a new mall. The returned mall carries the id the store assigned.
    pub async fn create(store: &dyn MallStore, input: &MallInput) -> Result<Mall, AppError> {
        let mall = store.insert(input).await?;
        tracing::info!(id = mall.id, name = %mall.name, "mall created");
        Ok(mall)
    }

    /// Overwrite name, score, location and restaurant flag of `id`, keeping the id.
    /// A missing `id` is created with exactly that id.
    pub async fn update(store: &dyn MallStore, id: i64, input: &MallInput) -> Result<UpdateOutcome, AppError> {
        let existed = store.find_by_id(id).await?.is_some();
        let mall = store.upsert(id, input).await?;
        if existed {
            tracing::info!(id, "mall updated");
            Ok(UpdateOutcome::Updated(mall))
        } else {
            tracing::info!(id, "mall created by update");
            Ok(UpdateOutcome::Created(mall))
        }
    }

    /// Delete `id` and return the values it held.
    pub async fn delete(store: &dyn MallStore, id: i64) -> Result<Mall, AppError> {
        let mall = store
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("mall {}", id)))?;
        tracing::info!(id, "mall deleted");
        Ok(mall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryMallStore;

    fn input(name: &str, score: i32) -> MallInput {
        MallInput {
            name: name.into(),
            score,
            location: "North".into(),
            has_restaurants: true,
        }
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = MemoryMallStore::new();
        let a = MallService::create(&store, &input("A", 1)).await.unwrap();
        let b = MallService::create(&store, &input("A", 1)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(MallInput::from(a), input("A", 1));
    }

    #[tokio::test]
    async fn update_existing_keeps_id() {
        let store = MemoryMallStore::new();
        let a = MallService::create(&store, &input("A", 1)).await.unwrap();
        let changed = MallInput {
            name: "B".into(),
            score: 8,
            location: "South".into(),
            has_restaurants: false,
        };
        let out = MallService::update(&store, a.id, &changed).await.unwrap();
        assert_eq!(out, UpdateOutcome::Updated(changed.clone().into_mall(a.id)));
        assert_eq!(store.find_by_id(a.id).await.unwrap(), Some(changed.into_mall(a.id)));
    }

    #[tokio::test]
    async fn update_missing_creates_with_given_id() {
        let store = MemoryMallStore::new();
        let out = MallService::update(&store, 42, &input("New", 3)).await.unwrap();
        assert_eq!(out, UpdateOutcome::Created(input("New", 3).into_mall(42)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found_and_leaves_store() {
        let store = MemoryMallStore::new();
        MallService::create(&store, &input("A", 1)).await.unwrap();
        let err = MallService::delete(&store, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_existing_returns_prior_values() {
        let store = MemoryMallStore::new();
        let a = MallService::create(&store, &input("A", 1)).await.unwrap();
        let removed = MallService::delete(&store, a.id).await.unwrap();
        assert_eq!(removed, a);
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
