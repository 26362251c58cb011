//! The process-wide storage handle.
//!
//! Constructed once by the composition root and injected everywhere; the
//! actual connection is established lazily, exactly once, behind a
//! `OnceCell`. Requests that race on first access all await the same
//! initialization.

use std::sync::Arc;

use tokio::sync::OnceCell;

use labelbase_auth::seed_permissions;

use crate::{MemoryBackend, StoreError};

pub struct Database {
    cell: OnceCell<Arc<MemoryBackend>>,
}

impl Database {
    /// A handle backed by the in-memory document store.
    pub fn in_memory() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Connect (idempotently) and return the backend.
    ///
    /// First access establishes the collections and seeds the permission
    /// reference data; every subsequent call reuses the same handle.
    pub async fn connect(&self) -> Result<&Arc<MemoryBackend>, StoreError> {
        self.cell
            .get_or_try_init(|| async {
                let backend = MemoryBackend::with_permissions(seed_permissions())?;
                tracing::info!("document store connected");
                Ok(Arc::new(backend))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PermissionStore;

    #[tokio::test]
    async fn connect_is_idempotent() {
        let db = Database::in_memory();
        let first = Arc::as_ptr(db.connect().await.unwrap());
        let second = Arc::as_ptr(db.connect().await.unwrap());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn connect_seeds_permissions() {
        let db = Database::in_memory();
        let backend = db.connect().await.unwrap();
        let all = backend.all().await.unwrap();
        assert!(all.iter().any(|p| p.title == "PRODUCT_VIEW"));
        assert!(all.iter().any(|p| p.title == "CATEGORY_CREATE"));
    }
}
